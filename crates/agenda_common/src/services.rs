// --- File: crates/agenda_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The calendar free/busy lookup and the language model are reached only
//! through these traits, so the scheduling logic can be driven by mocks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::BusyInterval;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Free/busy access to a calendar provider.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: StdError + Send + Sync + 'static;

    /// Busy intervals of `calendar_id` between `start_time` and `end_time`.
    ///
    /// `time_zone` is the IANA zone the provider should interpret the query in.
    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        time_zone: &str,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error>;
}

/// A single structured-output request to a language model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Short name of the prompt, used in logs.
    pub name: String,
    /// The fully rendered prompt.
    pub prompt: String,
    /// JSON schema the answer must follow.
    pub output_schema: Value,
}

/// A language model that answers prompts with a JSON object.
pub trait LanguageModelService: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    fn generate_json(&self, request: CompletionRequest) -> BoxFuture<'_, Value, Self::Error>;
}

impl<T: CalendarService + ?Sized> CalendarService for Arc<T> {
    type Error = T::Error;

    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        time_zone: &str,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        (**self).get_busy_times(calendar_id, start_time, end_time, time_zone)
    }
}

impl<T: LanguageModelService + ?Sized> LanguageModelService for Arc<T> {
    type Error = T::Error;

    fn generate_json(&self, request: CompletionRequest) -> BoxFuture<'_, Value, Self::Error> {
        (**self).generate_json(request)
    }
}

/// Wraps a calendar service so its errors become [`BoxedError`].
pub struct BoxedCalendarService<S> {
    inner: S,
}

impl<S> BoxedCalendarService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: CalendarService> CalendarService for BoxedCalendarService<S> {
    type Error = BoxedError;

    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        time_zone: &str,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let time_zone = time_zone.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .get_busy_times(&calendar_id, start_time, end_time, &time_zone)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Wraps a language model so its errors become [`BoxedError`].
pub struct BoxedLanguageModel<M> {
    inner: M,
}

impl<M> BoxedLanguageModel<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: LanguageModelService> LanguageModelService for BoxedLanguageModel<M> {
    type Error = BoxedError;

    fn generate_json(&self, request: CompletionRequest) -> BoxFuture<'_, Value, Self::Error> {
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .generate_json(request)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// A factory for creating service instances.
///
/// Services are `None` when turned off in the configuration or when they
/// failed to initialize.
pub trait ServiceFactory: Send + Sync {
    /// Get a calendar service instance.
    fn calendar_service(&self) -> Option<Arc<dyn CalendarService<Error = BoxedError>>>;

    /// Get a language model instance.
    fn language_model(&self) -> Option<Arc<dyn LanguageModelService<Error = BoxedError>>>;
}
