// --- File: crates/agenda_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout` - Per-request timeout
/// * `follow_redirects` - Whether the client should follow redirects
pub fn create_client(timeout: Duration, follow_redirects: bool) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(timeout)
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}
