// --- File: crates/services/agenda_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the Google Calendar and language model adapters the configuration
//! asks for. A service that fails to initialize is logged and left out; the
//! routes depending on it then answer 503.
use agenda_assistant::gateway::ChatCompletionsGateway;
use agenda_common::services::{
    BoxedCalendarService, BoxedError, BoxedLanguageModel, CalendarService, LanguageModelService,
    ServiceFactory,
};
use agenda_common::{is_gcal_enabled, is_llm_enabled, log_result};
use agenda_config::AppConfig;
use agenda_gcal::{auth::create_calendar_hub, service::GoogleCalendarService};
use std::sync::Arc;
use tracing::info;

pub struct AgendaServiceFactory {
    calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    language_model: Option<Arc<dyn LanguageModelService<Error = BoxedError>>>,
}

impl AgendaServiceFactory {
    /// Create a new service factory.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        Self {
            calendar_service: Self::init_calendar(&config).await,
            language_model: Self::init_language_model(&config),
        }
    }

    async fn init_calendar(config: &AppConfig) -> Option<Arc<dyn CalendarService<Error = BoxedError>>> {
        if !is_gcal_enabled(config) {
            info!("Google Calendar disabled by configuration");
            return None;
        }
        let gcal_config = config.gcal.as_ref()?;

        info!("Initializing Google Calendar service...");
        let hub = log_result(
            create_calendar_hub(gcal_config).await,
            "Google Calendar service initialized",
            "Failed to initialize Google Calendar service",
        )
        .ok()?;
        Some(Arc::new(BoxedCalendarService::new(GoogleCalendarService::new(
            Arc::new(hub),
        ))))
    }

    fn init_language_model(
        config: &AppConfig,
    ) -> Option<Arc<dyn LanguageModelService<Error = BoxedError>>> {
        if !is_llm_enabled(config) {
            info!("Language model disabled by configuration");
            return None;
        }
        let llm_config = config.llm.as_ref()?;

        let gateway = log_result(
            ChatCompletionsGateway::new(llm_config),
            "Language model gateway ready",
            "Failed to initialize language model gateway",
        )
        .ok()?;
        Some(Arc::new(BoxedLanguageModel::new(gateway)))
    }
}

impl ServiceFactory for AgendaServiceFactory {
    fn calendar_service(&self) -> Option<Arc<dyn CalendarService<Error = BoxedError>>> {
        self.calendar_service.clone()
    }

    fn language_model(&self) -> Option<Arc<dyn LanguageModelService<Error = BoxedError>>> {
        self.language_model.clone()
    }
}
