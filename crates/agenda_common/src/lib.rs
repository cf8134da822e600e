// --- File: crates/agenda_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Runtime feature checks
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Data structures shared across crates
pub mod services; // Ports for external collaborators

// Re-export error types and utilities for easier access
pub use error::{config_error, validation_error, AgendaError, Context, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::client::create_client;

// Re-export logging utilities for easier access
pub use logging::{init_with_config, log_error, log_result};

pub use features::{is_feature_enabled, is_gcal_enabled, is_llm_enabled};

pub use models::BusyInterval;
