// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared plumbing for stages that ask the model for one label.

use std::fmt::Display;
use std::str::FromStr;

use tracing::{error, warn};
use tutordesk_config::model::LlmConfig;
use tutordesk_core::types::{ProviderMessage, ProviderRequest};
use tutordesk_core::{FallbackReason, ProviderAdapter, StageOutcome, TutordeskError};

/// Builds a single-turn request carrying `prompt` with the configured model settings.
pub(crate) fn build_request(llm: &LlmConfig, prompt: String) -> ProviderRequest {
    ProviderRequest {
        model: llm.model.clone(),
        system_prompt: None,
        messages: vec![ProviderMessage::user(prompt)],
        max_tokens: llm.max_tokens,
        temperature: Some(llm.temperature),
    }
}

/// Sends `prompt` and returns the trimmed completion text.
pub(crate) async fn complete_trimmed(
    provider: &dyn ProviderAdapter,
    llm: &LlmConfig,
    prompt: String,
) -> Result<String, TutordeskError> {
    let response = provider.complete(build_request(llm, prompt)).await?;
    Ok(response.content.trim().to_string())
}

/// Parses a trimmed model answer as an exact label.
///
/// Matching is case-sensitive and whole-string: `"billing"` or
/// `"Positive."` do not count.
pub fn parse_label<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// Runs one closed-label stage: ask, parse, and fall back to `T::default()`.
///
/// Never fails; the [`StageOutcome`] records why a default was used.
pub(crate) async fn resolve_label<T>(
    provider: &dyn ProviderAdapter,
    llm: &LlmConfig,
    prompt: String,
    stage: &'static str,
) -> StageOutcome<T>
where
    T: FromStr + Default + Display,
{
    let raw = match complete_trimmed(provider, llm, prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            error!(stage, error = %e, "model call failed, using default");
            return StageOutcome::fallback(
                T::default(),
                FallbackReason::ProviderUnavailable {
                    error: e.to_string(),
                },
            );
        }
    };

    if raw.is_empty() {
        let default = T::default();
        warn!(stage, default = %default, "empty model output, using default");
        return StageOutcome::fallback(default, FallbackReason::EmptyResponse);
    }

    match parse_label(&raw) {
        Some(label) => StageOutcome::model(label),
        None => {
            let default = T::default();
            warn!(stage, raw = %raw, default = %default, "invalid label, using default");
            StageOutcome::fallback(default, FallbackReason::Unrecognized { raw })
        }
    }
}
