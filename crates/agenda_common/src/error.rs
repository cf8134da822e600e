// --- File: crates/agenda_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all Agenda crates.
///
/// Crates convert their own errors into this one at the HTTP boundary.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A feature was requested that this deployment has turned off
    #[error("Service unavailable: {0}")]
    UnavailableError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AgendaError {
    fn status_code(&self) -> u16 {
        match self {
            AgendaError::ConfigError(_) => 500,
            AgendaError::ValidationError(_) => 400,
            AgendaError::UnavailableError(_) => 503,
            AgendaError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Wraps the error as an internal error prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T, AgendaError>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, AgendaError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| AgendaError::InternalError(format!("{}: {}", context, error)))
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ValidationError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(validation_error("blank").status_code(), 400);
        assert_eq!(config_error("missing").status_code(), 500);
        assert_eq!(
            AgendaError::UnavailableError("gcal".into()).status_code(),
            503
        );
        assert_eq!(AgendaError::InternalError("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_messages_name_the_kind() {
        assert_eq!(
            config_error("GCal calendar ID missing").to_string(),
            "Configuration error: GCal calendar ID missing"
        );
        assert_eq!(
            AgendaError::UnavailableError("Chat assistant is disabled.".into()).to_string(),
            "Service unavailable: Chat assistant is disabled."
        );
    }

    #[test]
    fn test_context_wraps_foreign_error() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "key.json",
        ));
        let err = result.context("reading service account key").unwrap_err();
        assert!(matches!(err, AgendaError::InternalError(ref msg) if msg == "reading service account key: key.json"));
        assert_eq!(err.status_code(), 500);
    }
}
