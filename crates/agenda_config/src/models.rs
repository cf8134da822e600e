// --- File: crates/agenda_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of a pre-built chat frontend served for paths outside `/api`.
    #[serde(default)]
    pub static_dir: Option<String>,
}

// --- Scheduling Policy ---
// Raw values; validated into a policy by the calendar crate at startup.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SchedulingConfig {
    /// IANA name of the time zone working hours are expressed in.
    #[serde(default = "default_provider_time_zone")]
    pub provider_time_zone: String,
    /// First bookable hour (inclusive), provider-local.
    #[serde(default = "default_work_start_hour")]
    pub work_start_hour: u32,
    /// Closing hour (exclusive), provider-local.
    #[serde(default = "default_work_end_hour")]
    pub work_end_hour: u32,
    #[serde(default = "default_slot_duration_minutes")]
    pub slot_duration_minutes: i64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// How many calendar days ahead the search may look.
    #[serde(default = "default_search_horizon_days")]
    pub search_horizon_days: u32,
}

fn default_provider_time_zone() -> String {
    "America/Sao_Paulo".to_string()
}
fn default_work_start_hour() -> u32 {
    9
}
fn default_work_end_hour() -> u32 {
    18
}
fn default_slot_duration_minutes() -> i64 {
    60
}
fn default_max_suggestions() -> usize {
    3
}
fn default_search_horizon_days() -> u32 {
    14
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            provider_time_zone: default_provider_time_zone(),
            work_start_hour: default_work_start_hour(),
            work_end_hour: default_work_end_hour(),
            slot_duration_minutes: default_slot_duration_minutes(),
            max_suggestions: default_max_suggestions(),
            search_horizon_days: default_search_horizon_days(),
        }
    }
}

// --- Google Calendar Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    pub key_path: Option<String>,    // Path to the service account JSON key
    pub calendar_id: Option<String>, // Mandatory, e.g. "primary" or the provider's address
}

// --- Language Model Config ---
// The api_key is usually "secret_from_env" and resolved from AGENDA_SECRET_LLM_API_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_chat_completions_url")]
    pub chat_completions_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_base_backoff_ms")]
    pub retry_base_backoff_ms: u64,
}

fn default_chat_completions_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}
fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}
fn default_timeout_ms() -> u64 {
    15_000
}
fn default_max_retries() -> u32 {
    2
}
fn default_retry_base_backoff_ms() -> u64 {
    250
}

// --- Calendar invite details ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BookingConfig {
    #[serde(default = "default_organizer_name")]
    pub organizer_name: String,
    #[serde(default = "default_organizer_email")]
    pub organizer_email: String,
    /// Used when the requester does not give an address.
    #[serde(default = "default_attendee_email")]
    pub default_attendee_email: String,
}

fn default_organizer_name() -> String {
    "Agenda AI".to_string()
}
fn default_organizer_email() -> String {
    "noreply@agenda-ai.com".to_string()
}
fn default_attendee_email() -> String {
    "user@example.com".to_string()
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            organizer_name: default_organizer_name(),
            organizer_email: default_organizer_email(),
            default_attendee_email: default_attendee_email(),
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error. RUST_LOG wins when set.
    pub level: Option<String>,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_llm: bool,

    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub llm: Option<LlmConfig>,
}
