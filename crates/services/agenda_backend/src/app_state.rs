// --- File: crates/services/agenda_backend/src/app_state.rs ---
use std::sync::Arc;

use agenda_assistant::handlers::AssistantState;
use agenda_assistant::logic::AssistantService;
use agenda_common::services::ServiceFactory;
use agenda_common::{config_error, AgendaError};
use agenda_config::AppConfig;
use agenda_gcal::handlers::GcalState;
use agenda_gcal::logic::SchedulingPolicy;
use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::service_factory::AgendaServiceFactory;

/// Application state shared across all routes.
///
/// Each feature crate gets its own state; both are derived from the same
/// service factory so the chat flow and `/availability` see the same calendar.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service_factory: Arc<dyn ServiceFactory>,
    pub gcal_state: Arc<GcalState>,
    pub assistant_state: Arc<AssistantState>,
}

/// Builder for [`AppState`], used to inject a service factory.
pub struct AppStateBuilder {
    config: Arc<AppConfig>,
    service_factory: Option<Arc<dyn ServiceFactory>>,
    policy: Option<SchedulingPolicy>,
}

impl AppStateBuilder {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            service_factory: None,
            policy: None,
        }
    }

    /// Set the service factory.
    pub fn with_service_factory(mut self, service_factory: Arc<dyn ServiceFactory>) -> Self {
        self.service_factory = Some(service_factory);
        self
    }

    /// Use an already validated policy instead of deriving one from the config.
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Build the AppState.
    ///
    /// Fails when no service factory was set or the scheduling section of the
    /// configuration is not a valid policy.
    pub fn build(self) -> Result<AppState, AgendaError> {
        let service_factory = self
            .service_factory
            .ok_or_else(|| config_error("Service factory must be set"))?;
        let policy = match self.policy {
            Some(policy) => policy,
            None => SchedulingPolicy::try_from(&self.config.scheduling).map_err(config_error)?,
        };

        let calendar_service = service_factory.calendar_service();
        let calendar_id = self
            .config
            .gcal
            .as_ref()
            .and_then(|gcal| gcal.calendar_id.clone());

        let assistant = match (
            service_factory.language_model(),
            calendar_service.clone(),
            calendar_id,
        ) {
            (Some(language_model), Some(calendar), Some(calendar_id)) => {
                info!("Chat assistant enabled for calendar {}", calendar_id);
                Some(Arc::new(AssistantService::new(
                    language_model,
                    calendar,
                    calendar_id,
                    policy.clone(),
                )))
            }
            _ => {
                warn!("Chat assistant disabled: it needs both the language model and the calendar");
                None
            }
        };

        let gcal_state = Arc::new(GcalState {
            config: self.config.clone(),
            policy,
            calendar_service,
        });
        let assistant_state = Arc::new(AssistantState {
            booking: self.config.booking.clone(),
            service: assistant,
        });

        Ok(AppState {
            config: self.config,
            service_factory,
            gcal_state,
            assistant_state,
        })
    }
}

impl AppState {
    pub fn builder(config: Arc<AppConfig>) -> AppStateBuilder {
        AppStateBuilder::new(config)
    }

    /// Create a new AppState backed by the real Google Calendar and language model adapters.
    pub async fn new(config: Arc<AppConfig>, policy: SchedulingPolicy) -> Result<Self, AgendaError> {
        let service_factory = Arc::new(AgendaServiceFactory::new(config.clone()).await);
        Self::builder(config)
            .with_service_factory(service_factory)
            .with_policy(policy)
            .build()
    }

    /// All API routes, nested under `/api`, plus the configured static frontend.
    pub fn router(&self) -> Router {
        let api_router = Router::new()
            .route("/", get(|| async { "Welcome to the Agenda AI API!" }))
            .merge(agenda_gcal::routes::routes(self.gcal_state.clone()))
            .merge(agenda_assistant::routes::routes(self.assistant_state.clone()));

        let router = Router::new().nest("/api", api_router);
        match self.config.server.static_dir.as_deref() {
            Some(dir) => {
                info!("Serving static files from {}", dir);
                router.fallback_service(ServeDir::new(dir))
            }
            None => router,
        }
    }
}
