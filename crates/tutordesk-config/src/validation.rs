// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as numeric ranges and non-empty identifiers.

use crate::diagnostic::ConfigError;
use crate::model::TutordeskConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TutordeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` must be one of: {}",
                config.agent.log_level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.llm.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "llm.model must not be empty".to_string(),
        });
    }

    let temperature = config.llm.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::Validation {
            message: format!("llm.temperature must be between 0.0 and 2.0, got {temperature}"),
        });
    }

    if config.llm.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "llm.max_tokens must be at least 1".to_string(),
        });
    }

    if config.llm.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "llm.timeout_secs must be at least 1".to_string(),
        });
    }

    let base_url = config.llm.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "llm.base_url must not be empty".to_string(),
        });
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("llm.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.knowledge.top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "knowledge.top_k must be at least 1".to_string(),
        });
    }

    for (i, source) in config.knowledge.sources.iter().enumerate() {
        if source.path.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("knowledge.sources[{i}].path must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
