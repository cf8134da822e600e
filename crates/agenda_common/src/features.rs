//! Runtime feature checks.
//!
//! A feature is on when its `use_*` flag is set and its configuration
//! section is present. Compile-time features (`openapi`) are separate and
//! only add documentation routes.

use agenda_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Google Calendar feature is enabled at runtime.
pub fn is_gcal_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_gcal, config.gcal.as_ref())
}

/// Check if the language model (and with it the chat assistant) is enabled.
pub fn is_llm_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_llm, config.llm.as_ref())
}
