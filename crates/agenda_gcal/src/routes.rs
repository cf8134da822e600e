// --- File: crates/agenda_gcal/src/routes.rs ---

use crate::handlers::{get_availability_handler, GcalState};
use axum::{routing::get, Router};
use std::sync::Arc;

/// Creates a router containing all routes for the calendar feature.
pub fn routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route("/availability", get(get_availability_handler))
        .with_state(state)
}
