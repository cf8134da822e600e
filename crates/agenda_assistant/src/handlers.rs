// File: crates/agenda_assistant/src/handlers.rs
use crate::language::Language;
use crate::localization::greeting_messages;
use crate::logic::{
    confirm_selection, AssistantService, BookingConfirmation, ChatMessageRequest, ChatReply,
    SlotSelection,
};
use agenda_common::AgendaError;
use agenda_config::BookingConfig;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// Shared state for the chat routes
#[derive(Clone)]
pub struct AssistantState {
    pub booking: BookingConfig,
    /// `None` when the language model or the calendar is turned off.
    pub service: Option<Arc<AssistantService>>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct GreetingQuery {
    /// en, pt or es; anything else yields the three-language greeting.
    pub language: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GreetingResponse {
    pub language: Option<Language>,
    pub messages: Vec<String>,
}

/// Opening message(s) for a new conversation.
#[axum::debug_handler]
pub async fn get_greeting_handler(Query(query): Query<GreetingQuery>) -> Json<GreetingResponse> {
    let language = query.language.as_deref().and_then(Language::parse);
    Json(GreetingResponse {
        language,
        messages: greeting_messages(language)
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// Handles one user chat message.
#[axum::debug_handler]
pub async fn post_message_handler(
    State(state): State<Arc<AssistantState>>,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ChatReply>, AgendaError> {
    let service = state.service.as_ref().ok_or_else(|| {
        AgendaError::UnavailableError("Chat assistant is disabled.".to_string())
    })?;

    let reply = service.handle_message(&request, Utc::now()).await?;
    Ok(Json(reply))
}

/// Confirms a suggested slot and returns the invite inline.
#[axum::debug_handler]
pub async fn post_selection_handler(
    State(state): State<Arc<AssistantState>>,
    Json(selection): Json<SlotSelection>,
) -> Result<Json<BookingConfirmation>, AgendaError> {
    let confirmation = confirm_selection(&selection, &state.booking, Utc::now())?;
    Ok(Json(confirmation))
}

/// Same as the selection endpoint but answers with the `.ics` file itself.
#[axum::debug_handler]
pub async fn get_selection_ics_handler(
    State(state): State<Arc<AssistantState>>,
    Query(selection): Query<SlotSelection>,
) -> Result<Response, AgendaError> {
    let confirmation = confirm_selection(&selection, &state.booking, Utc::now())?;
    info!("Serving invite {}", confirmation.file_name);

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/calendar; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", confirmation.file_name),
            ),
        ],
        confirmation.ics,
    )
        .into_response())
}
