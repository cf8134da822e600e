// --- File: crates/agenda_assistant/src/language.rs ---
use agenda_common::services::LanguageModelService;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::prompts::identify_language_prompt;

/// Languages the assistant can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
    Es,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Pt, Language::Es];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
            Language::Es => "es",
        }
    }

    /// Case- and whitespace-insensitive match against the supported codes.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "en" => Some(Language::En),
            "pt" => Some(Language::Pt),
            "es" => Some(Language::Es),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Reads `{"language": "<code>"}` from model output.
pub fn parse_language_output(output: &Value) -> Option<Language> {
    output
        .get("language")
        .and_then(Value::as_str)
        .and_then(Language::parse)
}

/// Asks the model which language `text` is in.
///
/// Any answer outside the supported codes means English. Only a failed
/// model call is an error.
pub async fn identify_language<L>(language_model: &L, text: &str) -> Result<Language, L::Error>
where
    L: LanguageModelService + ?Sized,
{
    let output = language_model
        .generate_json(identify_language_prompt(text))
        .await?;

    let language = parse_language_output(&output);
    if language.is_none() {
        debug!("Unrecognised language answer {}, using English", output);
    }
    Ok(language.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::MockLanguageModel;
    use serde_json::json;

    #[test]
    fn test_parse_normalises_codes() {
        assert_eq!(Language::parse(" PT "), Some(Language::Pt));
        assert_eq!(Language::parse("es"), Some(Language::Es));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::parse(""), None);
    }

    #[test]
    fn test_parse_language_output() {
        assert_eq!(parse_language_output(&json!({"language": "Es"})), Some(Language::Es));
        assert_eq!(parse_language_output(&json!({"language": 3})), None);
        assert_eq!(parse_language_output(&json!({"lang": "pt"})), None);
    }

    #[test]
    fn test_serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::Pt).unwrap(), "\"pt\"");
        let parsed: Language = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(parsed, Language::Es);
    }

    #[tokio::test]
    async fn test_identify_language_defaults() {
        let model = MockLanguageModel::new(vec![
            Ok(json!({"language": "pt"})),
            Ok(json!({"language": "de"})),
            Ok(json!({})),
        ]);

        assert_eq!(identify_language(&model, "Olá").await.unwrap(), Language::Pt);
        assert_eq!(identify_language(&model, "Hallo").await.unwrap(), Language::En);
        assert_eq!(identify_language(&model, "ok").await.unwrap(), Language::En);
    }

    #[tokio::test]
    async fn test_identify_language_propagates_model_failure() {
        let model = MockLanguageModel::new(vec![Err("timeout".to_string())]);
        assert!(identify_language(&model, "Hello").await.is_err());
    }
}
