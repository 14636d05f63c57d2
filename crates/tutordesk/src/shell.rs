// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutordesk shell` command implementation.
//!
//! Interactive REPL with a colored prompt and readline history. Every line
//! is routed through the full pipeline; the pipeline is built once per
//! session.

use std::io::IsTerminal;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tutordesk_config::TutordeskConfig;
use tutordesk_core::TutordeskError;
use tutordesk_router::SupportOutcome;

use crate::ask::{build_pipeline, render_outcome};

/// What the REPL should do with one input line.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput<'a> {
    Quit,
    Skip,
    Query(&'a str),
}

fn classify_line(line: &str) -> ShellInput<'_> {
    match line.trim() {
        "/quit" | "/exit" => ShellInput::Quit,
        "" => ShellInput::Skip,
        query => ShellInput::Query(query),
    }
}

/// Text printed for one routed line: the outcome, or the error in red when
/// `color` is set.
fn render_reply(reply: &Result<SupportOutcome, TutordeskError>, color: bool) -> String {
    match reply {
        Ok(outcome) => render_outcome(outcome, color),
        Err(e) if color => format!("{}: {e}\n", "error".red()),
        Err(e) => format!("error: {e}\n"),
    }
}

/// Runs the `tutordesk shell` interactive REPL.
pub async fn run_shell(config: &TutordeskConfig) -> Result<(), TutordeskError> {
    let pipeline = build_pipeline(config).await.inspect_err(|_| {
        eprintln!(
            "error: could not start. Set llm.api_key or OPENAI_API_KEY, and check [[knowledge.sources]] paths."
        );
    })?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| TutordeskError::Internal(format!("failed to initialize readline: {e}")))?;

    let color = std::io::stdout().is_terminal();
    let prompt = if color {
        println!("{}", format!("{} shell", config.agent.name).bold().green());
        println!("Type {} to exit.\n", "/quit".yellow());
        format!("{}> ", config.agent.name.green())
    } else {
        println!("{} shell", config.agent.name);
        println!("Type /quit to exit.\n");
        format!("{}> ", config.agent.name)
    };
    loop {
        match rl.readline(&prompt) {
            Ok(line) => match classify_line(&line) {
                ShellInput::Quit => break,
                ShellInput::Skip => continue,
                ShellInput::Query(query) => {
                    let _ = rl.add_history_entry(&line);
                    let reply = pipeline.handle(query).await;
                    println!("{}", render_reply(&reply, color));
                }
            },
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    Ok(())
}
