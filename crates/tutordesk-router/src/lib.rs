// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query routing for the Tutordesk support desk.
//!
//! Three stages run over a request-scoped [`SupportRequest`]:
//!
//! - [`QueryClassifier`] picks one of three categories,
//! - [`SentimentScorer`] labels the tone,
//! - a [`ResponseHandler`] per category retrieves context and answers.
//!
//! [`SupportPipeline`] wires them together. No stage fails outward: each
//! substitutes a fixed default and records why in its
//! [`StageOutcome`](tutordesk_core::StageOutcome).
//!
//! [`SupportRequest`]: tutordesk_core::SupportRequest

pub mod classifier;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod sentiment;
mod stage;

pub use classifier::QueryClassifier;
pub use handlers::{apology, format_context, no_results_message, ResponseHandler};
pub use pipeline::{SupportOutcome, SupportPipeline};
pub use sentiment::SentimentScorer;
pub use stage::parse_label;
