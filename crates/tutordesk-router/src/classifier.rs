// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query category classification.
//!
//! Asks the model for exactly one of the three category labels. Anything
//! else, including a failed call, resolves to
//! [`QueryCategory::General`].

use std::sync::Arc;

use tracing::info;
use tutordesk_config::model::LlmConfig;
use tutordesk_core::{log_preview, ProviderAdapter, QueryCategory, StageOutcome};

use crate::prompts::classification_prompt;
use crate::stage::resolve_label;

/// LLM-backed category classifier.
pub struct QueryClassifier {
    provider: Arc<dyn ProviderAdapter>,
    llm: LlmConfig,
}

impl QueryClassifier {
    pub fn new(provider: Arc<dyn ProviderAdapter>, llm: &LlmConfig) -> Self {
        Self {
            provider,
            llm: llm.clone(),
        }
    }

    /// Classifies `query`. Always yields a category.
    pub async fn classify(&self, query: &str) -> StageOutcome<QueryCategory> {
        info!(query = log_preview(query, 100), "categorizing query");

        let outcome = resolve_label(
            self.provider.as_ref(),
            &self.llm,
            classification_prompt(query),
            "classifier",
        )
        .await;

        info!(category = %outcome.value, fallback = outcome.is_fallback(), "query categorized");
        outcome
    }
}
