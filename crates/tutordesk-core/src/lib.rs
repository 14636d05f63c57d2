// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tutordesk support router.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the workspace: the closed category and
//! sentiment label sets, the request record, stage outcomes, and the
//! provider / knowledge base adapter traits.

pub mod error;
pub mod outcome;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TutordeskError;
pub use outcome::{FallbackReason, Resolution, StageOutcome};
pub use types::{
    AdapterType, HealthStatus, KnowledgeDocument, QueryCategory, Sentiment, SupportRequest,
};

pub use traits::{KnowledgeBase, PluginAdapter, ProviderAdapter};

/// Truncates `text` to at most `max_chars` characters for log output.
pub fn log_preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tutordesk_error_has_all_variants() {
        let _config = TutordeskError::Config("test".into());
        let _provider = TutordeskError::Provider {
            message: "test".into(),
            source: None,
        };
        let _knowledge = TutordeskError::Knowledge {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _converter = TutordeskError::Converter {
            message: "test".into(),
            source: None,
        };
        let _field = TutordeskError::RecordField { field: "final_response" };
        let _timeout = TutordeskError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = TutordeskError::Internal("test".into());
    }

    #[test]
    fn adapter_type_round_trips() {
        use std::str::FromStr;

        for variant in [AdapterType::Provider, AdapterType::Knowledge] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn log_preview_is_char_safe() {
        assert_eq!(log_preview("hello", 100), "hello");
        assert_eq!(log_preview("hello", 2), "he");
        assert_eq!(log_preview("😊😊x", 2), "😊😊");
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_provider_adapter<T: ProviderAdapter>() {}
        fn _assert_knowledge_base<T: KnowledgeBase>() {}
    }
}
