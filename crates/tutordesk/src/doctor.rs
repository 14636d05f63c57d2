// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutordesk doctor` command implementation.
//!
//! Runs diagnostic checks against the configured provider, knowledge
//! sources and converter input to spot problems before the first query.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use tutordesk_config::TutordeskConfig;
use tutordesk_core::{HealthStatus, PluginAdapter, TutordeskError};
use tutordesk_knowledge::KnowledgeStore;
use tutordesk_openai::{OpenAiProvider, API_KEY_ENV};

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `tutordesk doctor` command.
///
/// With `plain`, disables colored output.
pub async fn run_doctor(config: &TutordeskConfig, plain: bool) -> Result<(), TutordeskError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_api_key(&config.llm.api_key, std::env::var(API_KEY_ENV).ok()),
        check_llm(config).await,
        check_knowledge(config).await,
        check_converter_input(&config.converter.input_path),
    ];

    println!();
    println!("  {} doctor", config.agent.name);
    println!("  {}", "-".repeat(50));

    for result in &results {
        println!("{}", format_line(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green().to_string(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow().to_string(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red().to_string(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<20} {} ({duration_ms}ms)", result.name, result.message)
    }
}

/// Check that some API key source is set.
fn check_api_key(config_key: &Option<String>, env_key: Option<String>) -> CheckResult {
    let start = Instant::now();
    let configured = |k: &Option<String>| k.as_deref().is_some_and(|k| !k.is_empty());

    if configured(config_key) {
        CheckResult::new("API key", CheckStatus::Pass, "set in config", start)
    } else if configured(&env_key) {
        CheckResult::new("API key", CheckStatus::Pass, format!("from {API_KEY_ENV}"), start)
    } else {
        CheckResult::new(
            "API key",
            CheckStatus::Fail,
            format!("not set (llm.api_key or {API_KEY_ENV})"),
            start,
        )
    }
}

/// Build the provider and run its health probe.
async fn check_llm(config: &TutordeskConfig) -> CheckResult {
    let start = Instant::now();
    match OpenAiProvider::new(&config.llm) {
        Ok(provider) => check_adapter("LLM API", &provider, start).await,
        Err(e) => CheckResult::new("LLM API", CheckStatus::Fail, e.to_string(), start),
    }
}

/// Load every knowledge source and report the document count.
async fn check_knowledge(config: &TutordeskConfig) -> CheckResult {
    let start = Instant::now();
    if config.knowledge.sources.is_empty() {
        return CheckResult::new(
            "Knowledge base",
            CheckStatus::Warn,
            "no [[knowledge.sources]] configured; answers will have no context",
            start,
        );
    }

    match KnowledgeStore::load(&config.knowledge).await {
        Ok(store) => {
            let mut result = check_adapter("Knowledge base", &store, start).await;
            if result.status != CheckStatus::Pass {
                return result;
            }
            let uncategorized = store.uncategorized();
            if uncategorized > 0 {
                result.status = CheckStatus::Warn;
                result.message = format!(
                    "{uncategorized} of {} documents have no category and are never \
                     retrieved by a handler; set `category` on their [[knowledge.sources]] entry",
                    store.len()
                );
            } else {
                result.message = format!(
                    "{} documents from {} source(s)",
                    store.len(),
                    config.knowledge.sources.len()
                );
            }
            result
        }
        Err(e) => CheckResult::new("Knowledge base", CheckStatus::Fail, e.to_string(), start),
    }
}

/// Map an adapter's health status onto a check result.
async fn check_adapter(name: &str, adapter: &dyn PluginAdapter, start: Instant) -> CheckResult {
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => CheckResult::new(name, CheckStatus::Pass, "healthy", start),
        Ok(HealthStatus::Degraded(reason)) => CheckResult::new(name, CheckStatus::Warn, reason, start),
        Ok(HealthStatus::Unhealthy(reason)) => CheckResult::new(name, CheckStatus::Fail, reason, start),
        Err(e) => CheckResult::new(name, CheckStatus::Fail, e.to_string(), start),
    }
}

/// The converter input only matters for `tutordesk convert`, so a missing file warns.
fn check_converter_input(path: &str) -> CheckResult {
    let start = Instant::now();
    if Path::new(path).exists() {
        CheckResult::new("Converter input", CheckStatus::Pass, path, start)
    } else {
        CheckResult::new(
            "Converter input",
            CheckStatus::Warn,
            format!("not found: {path}"),
            start,
        )
    }
}
