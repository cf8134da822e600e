// File: crates/agenda_assistant/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{GreetingQuery, GreetingResponse};
use crate::language::Language;
use crate::logic::{
    BookingConfirmation, ChatMessageRequest, ChatOutcome, ChatReply, SlotSelection,
};
use crate::understanding::RequestUnderstanding;

#[utoipa::path(
    get,
    path = "/chat/greeting",
    params(GreetingQuery),
    responses(
        (status = 200, description = "Opening messages", body = GreetingResponse,
         example = json!({
             "language": "en",
             "messages": ["Hello! I'm your Agenda AI assistant. How can I help you schedule your appointment today? I also understand Portuguese and Spanish."]
         })
        )
    ),
    tag = "chat"
)]
fn doc_get_greeting_handler() {}

#[utoipa::path(
    post,
    path = "/chat/messages",
    request_body(content = ChatMessageRequest, example = json!({
        "text": "Can we meet next Monday at 10am?",
        "language": "en",
        "time_zone": "Europe/Lisbon"
    })),
    responses(
        (status = 200, description = "Assistant reply", body = ChatReply,
         example = json!({
             "language": "en",
             "outcome": "suggestions",
             "message": "Here are some available slots. Please choose one, or let me know if another time works better:",
             "progress": [
                 "Okay, let me see what I can do for your request...",
                 "Got it! Let me check for available slots around that time for you..."
             ],
             "suggestions": ["2024-04-29T13:00:00Z", "2024-04-29T14:00:00Z", "2024-04-29T15:00:00Z"],
             "understanding": { "understood": true, "date_time": "2024-04-29T13:00:00Z" }
         })
        ),
        (status = 400, description = "Blank message",
         example = json!({ "error": { "message": "Validation error: message text must not be blank", "code": 400 } })
        ),
        (status = 503, description = "Chat assistant disabled")
    ),
    tag = "chat"
)]
fn doc_post_message_handler() {}

#[utoipa::path(
    post,
    path = "/chat/selection",
    request_body(content = SlotSelection, example = json!({
        "slot": "2024-04-29T13:00:00Z",
        "subject": "Dentist",
        "language": "en"
    })),
    responses(
        (status = 200, description = "Confirmation with calendar invite", body = BookingConfirmation),
        (status = 400, description = "Slot is not an RFC3339 instant")
    ),
    tag = "chat"
)]
fn doc_post_selection_handler() {}

#[utoipa::path(
    get,
    path = "/chat/selection.ics",
    params(SlotSelection),
    responses(
        (status = 200, description = "Calendar invite file", content_type = "text/calendar", body = String),
        (status = 400, description = "Slot is not an RFC3339 instant")
    ),
    tag = "chat"
)]
fn doc_get_selection_ics_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_greeting_handler,
        doc_post_message_handler,
        doc_post_selection_handler,
        doc_get_selection_ics_handler
    ),
    components(
        schemas(
            GreetingQuery,
            GreetingResponse,
            Language,
            ChatMessageRequest,
            ChatOutcome,
            ChatReply,
            RequestUnderstanding,
            SlotSelection,
            BookingConfirmation
        )
    ),
    tags(
        (name = "chat", description = "Scheduling assistant conversation")
    ),
    servers(
        (url = "/api", description = "Agenda API server")
    )
)]
pub struct AssistantApiDoc;
