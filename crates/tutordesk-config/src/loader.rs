// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tutordesk.toml` > `~/.config/tutordesk/tutordesk.toml`
//! > `/etc/tutordesk/tutordesk.toml` with environment variable overrides via
//! the `TUTORDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TutordeskConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/tutordesk/tutordesk.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tutordesk.toml";

/// Path of the per-user config file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tutordesk").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tutordesk/tutordesk.toml` (system-wide)
/// 3. `~/.config/tutordesk/tutordesk.toml` (user XDG config)
/// 4. `./tutordesk.toml` (local directory)
/// 5. `TUTORDESK_*` environment variables
pub fn load_config() -> Result<TutordeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TutordeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TutordeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TutordeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TutordeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TutordeskConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `TUTORDESK_LLM_API_KEY` must map to `llm.api_key`, not
/// `llm.api.key`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("TUTORDESK_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name to a dotted config path.
///
/// Figment hands the name over with its original case (`LLM_API_KEY`), so it
/// is lowercased before matching. Only the first matching section prefix is
/// rewritten.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: &[&str] = &["agent", "llm", "knowledge", "pipeline", "converter"];

    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("llm_api_key"), "llm.api_key");
        assert_eq!(map_env_key("llm_temperature"), "llm.temperature");
        assert_eq!(map_env_key("agent_log_level"), "agent.log_level");
        assert_eq!(map_env_key("knowledge_top_k"), "knowledge.top_k");
        assert_eq!(map_env_key("pipeline_analyze_sentiment"), "pipeline.analyze_sentiment");
        assert_eq!(map_env_key("converter_output_path"), "converter.output_path");
    }

    #[test]
    fn uppercase_env_names_map_to_sections() {
        assert_eq!(map_env_key("LLM_API_KEY"), "llm.api_key");
        assert_eq!(map_env_key("KNOWLEDGE_TOP_K"), "knowledge.top_k");
        assert_eq!(map_env_key("Agent_Log_Level"), "agent.log_level");
    }

    #[test]
    fn unknown_sections_pass_through() {
        assert_eq!(map_env_key("something_else"), "something_else");
        // `llmx_model` must not be mistaken for the llm section.
        assert_eq!(map_env_key("llmx_model"), "llmx_model");
    }
}
