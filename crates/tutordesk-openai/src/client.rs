// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Chat Completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! bearer authentication, and transient error retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};
use tutordesk_core::TutordeskError;

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client for OpenAI-compatible API communication.
///
/// Works against any server exposing `/chat/completions` and `/models`
/// under a common base URL. Transient errors (429, 500, 503, 529) are
/// retried once after a one-second pause.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `api_key` - Bearer token sent with every request
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, TutordeskError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                TutordeskError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TutordeskError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            max_retries: 1,
        })
    }

    /// Returns the API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a chat completion request and returns the parsed response.
    ///
    /// On transient errors, retries once after a 1-second delay.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, TutordeskError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| self.transport_err("HTTP request failed", e))?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response
                    .text()
                    .await
                    .map_err(|e| self.transport_err("failed to read response body", e))?;
                return serde_json::from_str(&body).map_err(|e| TutordeskError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            let body = response.text().await.unwrap_or_default();

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(TutordeskError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            return Err(TutordeskError::Provider {
                message: describe_api_error(status, &body),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| TutordeskError::Provider {
            message: "completion request failed after retries".into(),
            source: None,
        }))
    }

    /// Lists models as a token-free reachability and credential probe.
    ///
    /// Returns the HTTP status; transport failures become errors.
    pub async fn probe_models(&self) -> Result<StatusCode, TutordeskError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_err("HTTP request failed", e))?;
        Ok(response.status())
    }

    /// Maps a reqwest failure: timeouts become [`TutordeskError::Timeout`],
    /// everything else a provider error prefixed with `context`.
    fn transport_err(&self, context: &str, e: reqwest::Error) -> TutordeskError {
        if e.is_timeout() {
            warn!(timeout = ?self.timeout, "request timed out");
            return TutordeskError::Timeout {
                duration: self.timeout,
            };
        }
        TutordeskError::Provider {
            message: format!("{context}: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

/// Builds the error message for a failed response, preferring the API's
/// own error envelope over the raw body.
fn describe_api_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "OpenAI API error ({}): {}",
            api_err.error.type_.as_deref().unwrap_or("unknown"),
            api_err.error.message
        ),
        Err(_) => format!("API returned {status}: {body}"),
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new("sk-test", base_url, Duration::from_secs(5)).unwrap()
    }

    fn test_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            temperature: Some(0.7),
            max_tokens: Some(64),
        }
    }

    fn success_body(id: &str, text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "object": "chat.completion",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn chat_completion_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("chatcmpl-1", "Hi!")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat_completion(&test_request()).await.unwrap();

        assert_eq!(result.id, "chatcmpl-1");
        assert_eq!(result.usage.prompt_tokens, 10);
        assert_eq!(result.choices[0].message.content.as_deref(), Some("Hi!"));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("chatcmpl-2", "ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&format!("{}/", server.uri()));
        assert!(client.chat_completion(&test_request()).await.is_ok());
    }

    #[tokio::test]
    async fn chat_completion_retries_on_429() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "rate_limit_error", "message": "Rate limited"}
        });

        // First request returns 429, second returns 200.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("chatcmpl-retry", "After retry")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat_completion(&test_request()).await.unwrap();
        assert_eq!(result.id, "chatcmpl-retry");
    }

    #[tokio::test]
    async fn chat_completion_fails_on_401_without_retry() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "Incorrect API key provided"}
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat_completion(&test_request()).await.unwrap_err().to_string();
        assert!(err.contains("invalid_request_error"), "got: {err}");
        assert!(err.contains("Incorrect API key"), "got: {err}");
    }

    #[tokio::test]
    async fn chat_completion_exhausts_retries_on_503() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat_completion(&test_request()).await.unwrap_err().to_string();
        assert!(err.contains("503"), "got: {err}");
        assert!(err.contains("upstream overloaded"), "got: {err}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat_completion(&test_request()).await.unwrap_err().to_string();
        assert!(err.contains("failed to parse API response"), "got: {err}");
    }

    #[tokio::test]
    async fn client_sends_bearer_auth_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 64,
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("chatcmpl-h", "ok")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat_completion(&test_request()).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn probe_models_reports_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.probe_models().await.unwrap(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn slow_server_yields_timeout_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(success_body("chatcmpl-slow", "late"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client =
            OpenAiClient::new("sk-test", &server.uri(), Duration::from_millis(100)).unwrap();
        let err = client.chat_completion(&test_request()).await.unwrap_err();
        assert!(
            matches!(err, TutordeskError::Timeout { duration } if duration == Duration::from_millis(100)),
            "got: {err:?}"
        );
    }
}
