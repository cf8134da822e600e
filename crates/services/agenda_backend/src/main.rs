// File: services/agenda_backend/src/main.rs
use agenda_backend::AppState;
use agenda_common::Context;
use agenda_config::load_config;
use agenda_gcal::logic::SchedulingPolicy;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Arc::new(load_config().context("Failed to load config")?);
    // Held until shutdown so buffered file logs are flushed
    let _log_guard = agenda_common::init_with_config(&config.logging);

    // An unusable scheduling section stops the server before it binds
    let policy = SchedulingPolicy::try_from(&config.scheduling)?;
    info!(
        "Scheduling in {} from {}:00 to {}:00, {} minute slots",
        policy.provider_time_zone(),
        policy.work_start_hour(),
        policy.work_end_hour(),
        policy.slot_duration().num_minutes()
    );

    let state = AppState::new(config.clone(), policy).await?;
    let app = state.router();

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    let app = {
        use agenda_assistant::doc::AssistantApiDoc;
        use agenda_gcal::doc::GcalApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Agenda AI API",
                version = "0.1.0",
                description = "Scheduling assistant API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Agenda", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(GcalApiDoc::openapi());
        openapi_doc.merge(AssistantApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app.merge(swagger_ui)
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
