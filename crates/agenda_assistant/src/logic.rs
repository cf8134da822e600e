// --- File: crates/agenda_assistant/src/logic.rs ---
use std::sync::Arc;

use agenda_common::services::{BoxedError, CalendarService, LanguageModelService};
use agenda_common::{log_error, validation_error, AgendaError};
use agenda_config::BookingConfig;
use agenda_gcal::logic::{format_slot, parse_instant, suggest_slots, SchedulingPolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::ics::{generate_ics, Invite};
use crate::language::{identify_language, Language};
use crate::localization::{booking_confirmed, text, BotMessage};
use crate::understanding::{understand_request, RequestUnderstanding};

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("message text must not be blank")]
    EmptyMessage,
    #[error("invalid slot: {0}")]
    InvalidSlot(String),
}

impl From<AssistantError> for AgendaError {
    fn from(err: AssistantError) -> Self {
        validation_error(err)
    }
}

// --- Data Structures ---
#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatMessageRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Can we meet next Monday at 10am?"))]
    pub text: String,
    /// Language picked earlier in the conversation, used for the technical-error reply when detection fails.
    pub language: Option<Language>,
    /// Requester's IANA time zone. Logged only.
    #[cfg_attr(feature = "openapi", schema(example = "Europe/Lisbon"))]
    pub time_zone: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ChatOutcome {
    Suggestions,
    NoAvailability,
    NotUnderstood,
    TechnicalError,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatReply {
    pub language: Language,
    pub outcome: ChatOutcome,
    pub message: String,
    /// Interim messages in the order they would be shown.
    pub progress: Vec<String>,
    /// Slot starts, UTC RFC3339.
    pub suggestions: Vec<String>,
    pub understanding: Option<RequestUnderstanding>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotSelection {
    #[cfg_attr(feature = "openapi", schema(example = "2024-04-29T13:00:00Z"))]
    pub slot: String,
    pub subject: Option<String>,
    pub language: Option<Language>,
    pub attendee_name: Option<String>,
    pub attendee_email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingConfirmation {
    pub slot: String,
    pub subject: String,
    pub message: String,
    pub progress: Vec<String>,
    /// iCalendar text (`text/calendar`).
    pub ics: String,
    pub file_name: String,
}

// --- Conversation ---

/// Runs the chat flow: detect language, understand, then suggest slots.
pub struct AssistantService {
    language_model: Arc<dyn LanguageModelService<Error = BoxedError>>,
    calendar: Arc<dyn CalendarService<Error = BoxedError>>,
    calendar_id: String,
    policy: SchedulingPolicy,
}

impl AssistantService {
    pub fn new(
        language_model: Arc<dyn LanguageModelService<Error = BoxedError>>,
        calendar: Arc<dyn CalendarService<Error = BoxedError>>,
        calendar_id: impl Into<String>,
        policy: SchedulingPolicy,
    ) -> Self {
        Self {
            language_model,
            calendar,
            calendar_id: calendar_id.into(),
            policy,
        }
    }

    /// Answers one chat message.
    ///
    /// Only blank text is an error. A failing language model produces a
    /// `technical_error` reply; a failing calendar produces no suggestions.
    pub async fn handle_message(
        &self,
        request: &ChatMessageRequest,
        now: DateTime<Utc>,
    ) -> Result<ChatReply, AssistantError> {
        let text_in = request.text.trim();
        if text_in.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let language = match identify_language(self.language_model.as_ref(), text_in).await {
            Ok(language) => language,
            Err(e) => {
                log_error(e, "Language detection failed");
                return Ok(technical_error_reply(request.language.unwrap_or_default()));
            }
        };
        let mut progress = vec![text(BotMessage::WorkingOnIt, language).to_string()];

        let understanding =
            match understand_request(self.language_model.as_ref(), text_in, language, now).await {
                Ok(understanding) => understanding,
                Err(e) => {
                    log_error(e, "Request understanding failed");
                    return Ok(technical_error_reply(language));
                }
            };
        info!(
            "Message understood={} (language {}, date {:?})",
            understanding.understood, language, understanding.date_time
        );

        if !understanding.understood {
            return Ok(ChatReply {
                language,
                outcome: ChatOutcome::NotUnderstood,
                message: text(BotMessage::HelpPrompt, language).to_string(),
                progress,
                suggestions: Vec::new(),
                understanding: Some(understanding),
            });
        }

        let (requested_time, checking, nothing_found) = match understanding.date_time {
            Some(date_time) => (
                date_time,
                BotMessage::CheckingAroundTime,
                BotMessage::NoOpeningsForRequest,
            ),
            None => (now, BotMessage::CheckingNext, BotMessage::NoImmediateOpenings),
        };
        progress.push(text(checking, language).to_string());

        let slots = suggest_slots(
            self.calendar.as_ref(),
            &self.calendar_id,
            requested_time,
            request.time_zone.as_deref(),
            &self.policy,
            now,
        )
        .await;

        let (outcome, message) = if slots.is_empty() {
            (ChatOutcome::NoAvailability, text(nothing_found, language))
        } else {
            (
                ChatOutcome::Suggestions,
                text(BotMessage::SuggestionsIntro, language),
            )
        };

        Ok(ChatReply {
            language,
            outcome,
            message: message.to_string(),
            progress,
            suggestions: slots.iter().map(format_slot).collect(),
            understanding: Some(understanding),
        })
    }
}

fn technical_error_reply(language: Language) -> ChatReply {
    ChatReply {
        language,
        outcome: ChatOutcome::TechnicalError,
        message: text(BotMessage::TechnicalError, language).to_string(),
        progress: Vec::new(),
        suggestions: Vec::new(),
        understanding: None,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Confirms a chosen slot and renders its calendar invite.
pub fn confirm_selection(
    selection: &SlotSelection,
    booking: &BookingConfig,
    now: DateTime<Utc>,
) -> Result<BookingConfirmation, AssistantError> {
    let start =
        parse_instant(&selection.slot).map_err(|e| AssistantError::InvalidSlot(e.to_string()))?;
    let language = selection.language.unwrap_or_default();
    let subject = non_blank(selection.subject.as_deref())
        .unwrap_or(text(BotMessage::DefaultSubject, language));
    let attendee_name = non_blank(selection.attendee_name.as_deref())
        .unwrap_or(text(BotMessage::DefaultAttendeeName, language));
    let attendee_email = non_blank(selection.attendee_email.as_deref())
        .unwrap_or(&booking.default_attendee_email);

    let ics = generate_ics(
        &Invite {
            start,
            subject,
            attendee_name,
            attendee_email,
            organizer_name: &booking.organizer_name,
            organizer_email: &booking.organizer_email,
        },
        now,
    );
    info!("Confirmed slot {} as {}", format_slot(&start), ics.file_name);

    Ok(BookingConfirmation {
        slot: format_slot(&start),
        subject: subject.to_string(),
        message: booking_confirmed(language, subject),
        progress: vec![text(BotMessage::Confirming, language).to_string()],
        ics: ics.content,
        file_name: ics.file_name,
    })
}
