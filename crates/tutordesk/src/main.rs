// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tutordesk - a customer-support query router for a tutoring platform.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod ask;
mod convert;
mod doctor;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tutordesk_config::TutordeskConfig;

/// Tutordesk - route support queries to the right answer.
#[derive(Parser, Debug)]
#[command(name = "tutordesk", version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the standard lookup paths.
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify, score and answer a single query.
    Ask {
        /// The customer query.
        query: String,
        /// Print the full outcome as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run only the category classifier.
    Classify {
        /// The customer query.
        query: String,
    },
    /// Run only the sentiment scorer.
    Sentiment {
        /// The customer query.
        query: String,
    },
    /// Convert a curriculum file into knowledge base documents.
    Convert {
        /// Year records to read (defaults to `converter.input_path`).
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
        /// Destination file (defaults to `converter.output_path`).
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Launch an interactive REPL session.
    Shell,
    /// Check configuration, provider and knowledge sources.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => tutordesk_config::load_and_validate_path(path),
        None => tutordesk_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tutordesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);
    tracing::debug!(
        model = %config.llm.model,
        sources = config.knowledge.sources.len(),
        "configuration loaded"
    );

    if let Err(e) = run(cli.command, config).await {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

async fn run(
    command: Option<Commands>,
    config: TutordeskConfig,
) -> Result<(), tutordesk_core::TutordeskError> {
    match command {
        Some(Commands::Ask { query, json }) => ask::run_ask(&config, &query, json).await,
        Some(Commands::Classify { query }) => ask::run_classify(&config, &query).await,
        Some(Commands::Sentiment { query }) => ask::run_sentiment(&config, &query).await,
        Some(Commands::Convert { input, output }) => {
            convert::run_convert(&config.converter, input, output).await
        }
        Some(Commands::Shell) => shell::run_shell(&config).await,
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
        None => {
            println!("tutordesk: use --help for available commands");
            Ok(())
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so that
/// `ask --json` output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tutordesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
