// --- File: crates/agenda_assistant/src/prompts.rs ---
//! Prompt templates sent to the language model.

use agenda_common::services::CompletionRequest;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;

use crate::language::Language;

pub const IDENTIFY_LANGUAGE: &str = "identify_language";
pub const UNDERSTAND_REQUEST: &str = "understand_request";

pub fn identify_language_prompt(text: &str) -> CompletionRequest {
    let prompt = format!(
        r#"Identify the primary language of the text below and answer with its two-letter ISO 639-1 code.
Supported languages: English (en), Portuguese (pt), Spanish (es).
When the text is mixed, unclear or in another language, answer "en".

Text:
"{text}"

Answer only with the JSON object, for example {{"language": "pt"}}."#
    );

    CompletionRequest {
        name: IDENTIFY_LANGUAGE.to_string(),
        prompt,
        output_schema: json!({
            "type": "object",
            "properties": {
                "language": {
                    "type": "string",
                    "description": "ISO 639-1 code: en, pt or es"
                }
            },
            "required": ["language"]
        }),
    }
}

/// `reference` is the current instant; relative dates are resolved against it.
pub fn understand_request_prompt(
    text: &str,
    language: Language,
    reference: DateTime<Utc>,
) -> CompletionRequest {
    let reference = reference.to_rfc3339_opts(SecondsFormat::Millis, true);
    let language = language.code();
    let prompt = format!(
        r#"You help people book appointments. The message below is written in "{language}"; read it in that language.

Set "understood" to true when the message is about scheduling, booking, availability, or changing or cancelling an appointment.
When understood:
  - put the requested date and time in "dateTime" as an ISO 8601 instant (YYYY-MM-DDTHH:mm:ss.sssZ);
  - resolve relative expressions such as "tomorrow", "next Monday" or "in three weeks" against {reference};
  - when a future day is given without a time, use 09:00 on that day;
  - put the duration in minutes in "duration" and the purpose in "subject" when they are mentioned.
Set "understood" to false for greetings, small talk or anything without a clear scheduling intent.
Leave out fields you cannot determine, but always include "understood".

Message: {text}

Current date for reference: {reference}

Examples:
{{"understood": true, "dateTime": "2025-05-20T14:00:00.000Z", "subject": "Doctor's visit"}}
{{"understood": true, "subject": "check availability"}}
{{"understood": false}}"#
    );

    CompletionRequest {
        name: UNDERSTAND_REQUEST.to_string(),
        prompt,
        output_schema: json!({
            "type": "object",
            "properties": {
                "understood": { "type": "boolean" },
                "dateTime": { "type": "string", "description": "ISO 8601 instant" },
                "duration": { "type": "number", "description": "minutes" },
                "subject": { "type": "string" }
            },
            "required": ["understood"]
        }),
    }
}
