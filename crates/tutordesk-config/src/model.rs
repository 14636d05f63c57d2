// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tutordesk support router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use tutordesk_core::QueryCategory;

/// Top-level Tutordesk configuration.
///
/// Built once at process start and passed by reference to every stage.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TutordeskConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Language model settings shared by every stage.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Knowledge base document sources and retrieval depth.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Routing pipeline switches.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Curriculum converter paths.
    #[serde(default)]
    pub converter: ConverterConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in the shell prompt and doctor report.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "tutordesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Language model configuration.
///
/// One model and one temperature serve the classifier, the sentiment
/// scorer and all three response handlers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature (0.0-2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate per call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Base URL of the OpenAI-compatible API (without `/chat/completions`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Knowledge base configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// Maximum number of documents returned per search.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Document files loaded at startup, in order.
    #[serde(default)]
    pub sources: Vec<KnowledgeSourceConfig>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            sources: Vec::new(),
        }
    }
}

fn default_top_k() -> usize {
    4
}

/// A single `{"documents": [...]}` file feeding the knowledge base.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeSourceConfig {
    /// Path to the document JSON file.
    pub path: String,

    /// Category applied to documents without `category` metadata.
    /// Accepts the full label or the short name (`academic`, `billing`, `general`).
    #[serde(default)]
    pub category: Option<QueryCategory>,

    /// Source label applied to documents without `source` metadata.
    #[serde(default)]
    pub source: Option<String>,
}

/// Routing pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Run the sentiment scorer between classification and dispatch.
    #[serde(default = "default_analyze_sentiment")]
    pub analyze_sentiment: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            analyze_sentiment: default_analyze_sentiment(),
        }
    }
}

fn default_analyze_sentiment() -> bool {
    true
}

/// Curriculum converter configuration.
///
/// Converted documents carry no `category` metadata. List the output file
/// under `[[knowledge.sources]]` with `category = "academic"` so the
/// academic handler's filtered searches can find them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConverterConfig {
    /// JSON array of year records to read.
    #[serde(default = "default_converter_input")]
    pub input_path: String,

    /// Destination of the flattened document list.
    #[serde(default = "default_converter_output")]
    pub output_path: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input_path: default_converter_input(),
            output_path: default_converter_output(),
        }
    }
}

fn default_converter_input() -> String {
    "data/uk_school_courses_Y1_to_Y11.json".to_string()
}

fn default_converter_output() -> String {
    "data/uk_curriculum_documents.json".to_string()
}
