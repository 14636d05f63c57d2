// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tutordesk support router.

use thiserror::Error;

/// The primary error type used across all Tutordesk adapter traits and core operations.
#[derive(Debug, Error)]
pub enum TutordeskError {
    /// Configuration errors (invalid TOML, missing credentials, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// LLM provider errors (API failure, malformed response, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Knowledge base errors (unreadable document file, malformed JSON, search failure).
    #[error("knowledge base error: {message}")]
    Knowledge {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Curriculum converter errors (input unreadable, output not writable).
    #[error("converter error: {message}")]
    Converter {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A request record field was written more than once.
    #[error("request field `{field}` has already been set")]
    RecordField { field: &'static str },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
