// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapter for the Tutordesk support router.
//!
//! This crate implements [`ProviderAdapter`] over the Chat Completions API.
//! Any server speaking that wire format (OpenAI, Azure-style gateways,
//! local inference servers) can be targeted through `llm.base_url`.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use tutordesk_config::model::LlmConfig;
use tutordesk_core::traits::{PluginAdapter, ProviderAdapter};
use tutordesk_core::types::{
    AdapterType, HealthStatus, ProviderRequest, ProviderResponse, TokenUsage,
};
use tutordesk_core::TutordeskError;

use crate::client::OpenAiClient;
use crate::types::{ChatCompletionRequest, ChatMessage};

/// Environment variable consulted when `llm.api_key` is unset.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a new provider from the `[llm]` configuration section.
    ///
    /// # API Key Resolution
    /// 1. `config.api_key` if set and non-empty
    /// 2. `OPENAI_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &LlmConfig) -> Result<Self, TutordeskError> {
        let api_key = resolve_api_key(&config.api_key, std::env::var(API_KEY_ENV).ok())?;
        let client = OpenAiClient::new(
            &api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(
            model = %config.model,
            base_url = client.base_url(),
            "OpenAI provider initialized"
        );

        Ok(Self { client })
    }

    /// Converts a [`ProviderRequest`] into the chat wire format.
    ///
    /// A system prompt, when present, becomes the leading `system` message.
    fn to_chat_request(request: &ProviderRequest) -> ChatCompletionRequest {
        let system = request.system_prompt.as_ref().map(|prompt| ChatMessage {
            role: "system".into(),
            content: prompt.clone(),
        });

        let messages = system
            .into_iter()
            .chain(request.messages.iter().map(|m| ChatMessage {
                role: m.role.clone(),
                content: m.content.clone(),
            }))
            .collect();

        ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: Some(request.max_tokens),
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, TutordeskError> {
        // Listing models costs no tokens but still exercises auth.
        let status = match self.client.probe_models().await {
            Ok(status) => status,
            Err(e) => return Ok(HealthStatus::Unhealthy(e.to_string())),
        };
        debug!(status = %status, "provider health probe");

        Ok(match status.as_u16() {
            200..=299 => HealthStatus::Healthy,
            401 | 403 => HealthStatus::Unhealthy(format!("credentials rejected ({status})")),
            _ => HealthStatus::Degraded(format!("models endpoint returned {status}")),
        })
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, TutordeskError> {
        let api_request = Self::to_chat_request(&request);
        let response = self.client.chat_completion(&api_request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TutordeskError::Provider {
                message: "API response contained no choices".into(),
                source: None,
            })?;

        Ok(ProviderResponse {
            id: response.id,
            content: choice.message.content.unwrap_or_default(),
            model: response.model,
            stop_reason: choice.finish_reason,
            usage: TokenUsage {
                input_tokens: response.usage.prompt_tokens,
                output_tokens: response.usage.completion_tokens,
            },
        })
    }
}

/// Resolves the API key from config, falling back to the environment value.
fn resolve_api_key(
    config_key: &Option<String>,
    env_key: Option<String>,
) -> Result<String, TutordeskError> {
    if let Some(key) = config_key.as_ref().filter(|k| !k.is_empty()) {
        return Ok(key.clone());
    }

    env_key.filter(|k| !k.is_empty()).ok_or_else(|| {
        TutordeskError::Config(format!(
            "OpenAI API key not found. Set llm.api_key in config or the {API_KEY_ENV} environment variable."
        ))
    })
}
