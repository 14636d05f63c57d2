// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls. Every
//! request is captured so tests can assert on the rendered prompts.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tutordesk_core::traits::{PluginAdapter, ProviderAdapter};
use tutordesk_core::types::{
    AdapterType, HealthStatus, ProviderRequest, ProviderResponse, TokenUsage,
};
use tutordesk_core::TutordeskError;

/// Text returned when the reply queue is empty.
pub const DEFAULT_MOCK_RESPONSE: &str = "mock response";

/// One scripted provider reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text as the completion.
    Text(String),
    /// Fail the call with a provider error carrying this message.
    Fail(String),
}

/// A mock LLM provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// [`DEFAULT_MOCK_RESPONSE`] is returned. A provider built with
/// [`MockProvider::failing`] ignores the queue and fails every call.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    failure: Option<String>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider pre-loaded with text replies.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = responses
            .into_iter()
            .map(|s| MockReply::Text(s.into()))
            .collect();
        Self {
            replies: Arc::new(Mutex::new(queue)),
            ..Self::default()
        }
    }

    /// Create a mock provider whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Add a text reply to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(MockReply::Text(text.into()));
    }

    /// Add a failing reply to the end of the queue.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.replies.lock().await.push_back(MockReply::Fail(message.into()));
    }

    /// All requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    /// The user-turn text of every request received so far.
    pub async fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .filter_map(|r| r.messages.last().map(|m| m.content.clone()))
            .collect()
    }

    /// Number of calls received.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, TutordeskError> {
        Ok(match &self.failure {
            Some(message) => HealthStatus::Unhealthy(message.clone()),
            None => HealthStatus::Healthy,
        })
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, TutordeskError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        if let Some(message) = &self.failure {
            return Err(TutordeskError::Provider {
                message: message.clone(),
                source: None,
            });
        }

        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Text(DEFAULT_MOCK_RESPONSE.to_string()));

        match reply {
            MockReply::Text(content) => Ok(ProviderResponse {
                id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
                content,
                model,
                stop_reason: Some("stop".to_string()),
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
            }),
            MockReply::Fail(message) => Err(TutordeskError::Provider {
                message,
                source: None,
            }),
        }
    }
}
