// --- File: crates/agenda_assistant/src/understanding.rs ---
use agenda_common::services::LanguageModelService;
use agenda_gcal::logic::parse_instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::language::Language;
use crate::prompts::understand_request_prompt;

/// What the model made of a chat message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RequestUnderstanding {
    /// The message is about scheduling.
    pub understood: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl RequestUnderstanding {
    /// Builds an understanding from raw model output.
    ///
    /// Output without a boolean `understood` is treated as not understood and
    /// its other fields are ignored. A `dateTime` that is not an instant is
    /// dropped, as are blank subjects and non-positive durations.
    pub fn from_model_output(output: &Value) -> Self {
        let Some(understood) = output.get("understood").and_then(Value::as_bool) else {
            warn!("Model output lacks a boolean 'understood': {}", output);
            return Self::default();
        };

        let date_time = output
            .get("dateTime")
            .and_then(Value::as_str)
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match parse_instant(raw) {
                Ok(instant) => Some(instant),
                Err(e) => {
                    debug!("Dropping dateTime: {}", e);
                    None
                }
            });

        let duration_minutes = output
            .get("duration")
            .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|f| f.round() as i64)))
            .filter(|minutes| *minutes > 0);

        let subject = output
            .get("subject")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|subject| !subject.is_empty())
            .map(str::to_string);

        Self {
            understood,
            date_time,
            duration_minutes,
            subject,
        }
    }
}

/// Asks the model whether `text` is a scheduling request and extracts its details.
pub async fn understand_request<L>(
    language_model: &L,
    text: &str,
    language: Language,
    reference: DateTime<Utc>,
) -> Result<RequestUnderstanding, L::Error>
where
    L: LanguageModelService + ?Sized,
{
    let output = language_model
        .generate_json(understand_request_prompt(text, language, reference))
        .await?;
    Ok(RequestUnderstanding::from_model_output(&output))
}
