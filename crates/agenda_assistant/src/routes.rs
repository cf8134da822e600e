// --- File: crates/agenda_assistant/src/routes.rs ---

use crate::handlers::{
    get_greeting_handler, get_selection_ics_handler, post_message_handler,
    post_selection_handler, AssistantState,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all chat routes.
pub fn routes(state: Arc<AssistantState>) -> Router {
    Router::new()
        .route("/chat/greeting", get(get_greeting_handler))
        .route("/chat/messages", post(post_message_handler))
        .route("/chat/selection", post(post_selection_handler))
        .route("/chat/selection.ics", get(get_selection_ics_handler))
        .with_state(state)
}
