// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Tutordesk configuration system.

use std::io::Write;
use std::path::Path;

use figment::Jail;
use tutordesk_config::diagnostic::ConfigError;
use tutordesk_config::model::TutordeskConfig;
use tutordesk_config::{load_and_validate_path, load_and_validate_str, load_config_from_path, load_config_from_str};
use tutordesk_core::QueryCategory;

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[agent]
name = "desk"
log_level = "debug"

[llm]
api_key = "sk-test"
model = "gpt-4o"
temperature = 0.2
max_tokens = 512
base_url = "http://localhost:8080/v1"
timeout_secs = 30

[knowledge]
top_k = 6

[[knowledge.sources]]
path = "data/curriculum.json"
category = "academic"
source = "UK National Curriculum"

[[knowledge.sources]]
path = "data/billing_faq.json"
category = "Billing, Payments & Administrative"

[pipeline]
analyze_sentiment = false

[converter]
input_path = "in.json"
output_path = "out.json"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "desk");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.llm.model, "gpt-4o");
    assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.llm.max_tokens, 512);
    assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
    assert_eq!(config.llm.timeout_secs, 30);
    assert_eq!(config.knowledge.top_k, 6);
    assert_eq!(config.knowledge.sources.len(), 2);
    assert_eq!(config.knowledge.sources[0].category, Some(QueryCategory::Academic));
    assert_eq!(
        config.knowledge.sources[0].source.as_deref(),
        Some("UK National Curriculum")
    );
    assert_eq!(config.knowledge.sources[1].category, Some(QueryCategory::Billing));
    assert!(config.knowledge.sources[1].source.is_none());
    assert!(!config.pipeline.analyze_sentiment);
    assert_eq!(config.converter.input_path, "in.json");
    assert_eq!(config.converter.output_path, "out.json");
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "tutordesk");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.llm.api_key.is_none());
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
    assert_eq!(config.knowledge.top_k, 4);
    assert!(config.knowledge.sources.is_empty());
    assert!(config.pipeline.analyze_sentiment);
    assert_eq!(config.converter.input_path, "data/uk_school_courses_Y1_to_Y11.json");
}

/// Unknown field in [llm] is rejected.
#[test]
fn unknown_field_in_llm_produces_error() {
    let toml = r#"
[llm]
modle = "gpt-4o"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("modle"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown key becomes an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_diagnostic_suggests_correction() {
    let toml = r#"
[llm]
temprature = 0.1
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey { key, suggestion, .. } => {
            assert_eq!(key, "temprature");
            assert_eq!(suggestion.as_deref(), Some("temperature"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// An unknown category label in a knowledge source is rejected at load time.
#[test]
fn unknown_source_category_is_rejected() {
    let toml = r#"
[[knowledge.sources]]
path = "x.json"
category = "Technical"
"#;

    assert!(load_and_validate_str(toml).is_err());
}

/// Validation errors surface through load_and_validate_str.
#[test]
fn validation_runs_after_deserialization() {
    let toml = r#"
[llm]
temperature = 4.0

[knowledge]
top_k = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Wrong value type is reported as a diagnostic rather than a panic.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[pipeline]
analyze_sentiment = "yes"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(!errors.is_empty());
}

/// Environment variables override file values, and underscores inside
/// key names survive the section mapping.
#[test]
fn env_vars_override_file_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "tutordesk.toml",
            r#"
[llm]
model = "from-file"
max_tokens = 256
"#,
        )?;
        jail.set_env("TUTORDESK_LLM_MODEL", "from-env");
        jail.set_env("TUTORDESK_LLM_API_KEY", "sk-env");
        jail.set_env("TUTORDESK_PIPELINE_ANALYZE_SENTIMENT", "false");

        let config: TutordeskConfig = load_config_from_path(Path::new("tutordesk.toml"))?;
        assert_eq!(config.llm.model, "from-env");
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.llm.max_tokens, 256);
        assert!(!config.pipeline.analyze_sentiment);
        Ok(())
    });
}

/// Environment variables alone are enough when no file exists.
#[test]
fn env_vars_apply_without_a_config_file() {
    Jail::expect_with(|jail| {
        jail.set_env("TUTORDESK_LLM_API_KEY", "sk-env");
        jail.set_env("TUTORDESK_KNOWLEDGE_TOP_K", "7");
        jail.set_env("TUTORDESK_AGENT_LOG_LEVEL", "debug");

        let config: TutordeskConfig = load_config_from_path(Path::new("absent.toml"))?;
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.knowledge.top_k, 7);
        assert_eq!(config.agent.log_level, "debug");
        Ok(())
    });
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_file_yields_defaults() {
    let config = load_config_from_path(Path::new("/nonexistent/path/tutordesk.toml"))
        .expect("missing file should be silently skipped");
    assert_eq!(config.agent.name, "tutordesk");
}

/// load_and_validate_path reads an explicit file.
#[test]
fn load_and_validate_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[agent]\nname = \"from-path\"").expect("write");

    let config = load_and_validate_path(file.path()).expect("should load");
    assert_eq!(config.agent.name, "from-path");
}
