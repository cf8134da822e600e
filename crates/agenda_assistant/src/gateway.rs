// --- File: crates/agenda_assistant/src/gateway.rs ---
//! OpenAI-compatible chat completions client implementing the language model port.

use std::time::Duration;

use agenda_common::create_client;
use agenda_common::services::{BoxFuture, CompletionRequest, LanguageModelService};
use agenda_config::{LlmConfig, SECRET_MARKER};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are the language backend of a scheduling assistant. \
Answer with a single JSON object and nothing else.";

#[derive(Debug, Error)]
pub enum LlmGatewayError {
    #[error("invalid language model configuration: {0}")]
    Configuration(String),
    #[error("language model request timed out")]
    Timeout,
    #[error("language model request failed: {0}")]
    ProviderFailure(String),
    #[error("language model returned an invalid payload: {0}")]
    InvalidProviderPayload(String),
}

#[derive(Clone)]
pub struct ChatCompletionsGateway {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: String,
}

impl ChatCompletionsGateway {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmGatewayError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != SECRET_MARKER)
            .ok_or_else(|| {
                LlmGatewayError::Configuration("llm.api_key is not set".to_string())
            })?
            .to_string();

        if !config.chat_completions_url.starts_with("http://")
            && !config.chat_completions_url.starts_with("https://")
        {
            return Err(LlmGatewayError::Configuration(
                "llm.chat_completions_url must start with http:// or https://".to_string(),
            ));
        }

        let client = create_client(Duration::from_millis(config.timeout_ms), true)
            .map_err(|err| LlmGatewayError::Configuration(err.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    async fn generate_with_retries(
        &self,
        request: &CompletionRequest,
    ) -> Result<Value, LlmGatewayError> {
        let mut attempt = 0_u32;

        loop {
            match self.send_once(request).await {
                Ok(output) => return Ok(output),
                Err(err) => {
                    if err.retryable && attempt < self.config.max_retries {
                        let backoff_ms = self
                            .config
                            .retry_base_backoff_ms
                            .saturating_mul(2_u64.saturating_pow(attempt));
                        warn!(
                            "{} attempt {} failed ({}), retrying in {}ms",
                            request.name,
                            attempt + 1,
                            err.error,
                            backoff_ms
                        );
                        sleep(Duration::from_millis(backoff_ms)).await;
                        attempt = attempt.saturating_add(1);
                        continue;
                    }

                    return Err(err.error);
                }
            }
        }
    }

    async fn send_once(&self, request: &CompletionRequest) -> Result<Value, SendAttemptError> {
        let system_prompt = format!(
            "{SYSTEM_PROMPT}\nThe object must follow this JSON schema:\n{}",
            request.output_schema
        );
        let request_body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": request.prompt }
            ],
            "response_format": {
                "type": "json_object"
            },
            "temperature": 0
        });

        let response = self
            .client
            .post(&self.config.chat_completions_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    SendAttemptError::retryable(LlmGatewayError::Timeout)
                } else {
                    SendAttemptError::retryable(LlmGatewayError::ProviderFailure(
                        "request_unavailable".to_string(),
                    ))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|_| {
            SendAttemptError::non_retryable(LlmGatewayError::InvalidProviderPayload(
                "response_body_read_failed".to_string(),
            ))
        })?;

        if !status.is_success() {
            return Err(SendAttemptError {
                error: LlmGatewayError::ProviderFailure(format!(
                    "status={} code={}",
                    status.as_u16(),
                    parse_provider_error_code(&body)
                )),
                retryable: is_retryable_status(status),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|_| {
            SendAttemptError::non_retryable(LlmGatewayError::InvalidProviderPayload(
                "response_json_parse_failed".to_string(),
            ))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                SendAttemptError::non_retryable(LlmGatewayError::InvalidProviderPayload(
                    "missing_choice".to_string(),
                ))
            })?
            .message
            .content;

        match content {
            Value::String(raw) => serde_json::from_str::<Value>(&raw).map_err(|_| {
                SendAttemptError::non_retryable(LlmGatewayError::InvalidProviderPayload(
                    "content_not_json".to_string(),
                ))
            }),
            // Already-parsed JSON of any shape goes to the output parsers as is
            value => Ok(value),
        }
    }
}

impl LanguageModelService for ChatCompletionsGateway {
    type Error = LlmGatewayError;

    fn generate_json(&self, request: CompletionRequest) -> BoxFuture<'_, Value, Self::Error> {
        Box::pin(async move {
            debug!("Sending {} prompt to {}", request.name, self.config.model);
            let output = self.generate_with_retries(&request).await?;
            debug!("{} answered: {}", request.name, output);
            Ok(output)
        })
    }
}

#[derive(Debug)]
struct SendAttemptError {
    error: LlmGatewayError,
    retryable: bool,
}

impl SendAttemptError {
    fn retryable(error: LlmGatewayError) -> Self {
        Self {
            error,
            retryable: true,
        }
    }

    fn non_retryable(error: LlmGatewayError) -> Self {
        Self {
            error,
            retryable: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageContent,
}

#[derive(Debug, Deserialize)]
struct ChatMessageContent {
    content: Value,
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn parse_provider_error_code(body: &str) -> String {
    let code = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.get("code").cloned());

    match code {
        Some(Value::String(code)) => code,
        Some(Value::Number(code)) => code.to_string(),
        _ => "unknown".to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>, url: &str) -> LlmConfig {
        LlmConfig {
            chat_completions_url: url.to_string(),
            model: "test-model".to_string(),
            api_key: api_key.map(str::to_string),
            timeout_ms: 1_000,
            max_retries: 0,
            retry_base_backoff_ms: 0,
        }
    }

    #[test]
    fn test_missing_or_unresolved_api_key_is_rejected() {
        let url = "https://llm.example.com/v1/chat/completions";
        for key in [None, Some(""), Some("  "), Some(SECRET_MARKER)] {
            let result = ChatCompletionsGateway::new(&config(key, url));
            assert!(matches!(result, Err(LlmGatewayError::Configuration(_))));
        }
        assert!(ChatCompletionsGateway::new(&config(Some("sk-test"), url)).is_ok());
    }

    #[test]
    fn test_url_scheme_is_validated() {
        let result = ChatCompletionsGateway::new(&config(Some("sk-test"), "llm.example.com"));
        assert!(matches!(result, Err(LlmGatewayError::Configuration(_))));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_provider_error_code_parsing() {
        assert_eq!(
            parse_provider_error_code(r#"{"error":{"code":"rate_limited"}}"#),
            "rate_limited"
        );
        assert_eq!(parse_provider_error_code(r#"{"error":{"code":429}}"#), "429");
        assert_eq!(parse_provider_error_code("<html>"), "unknown");
    }
}
