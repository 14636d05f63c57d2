// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query sentiment scoring. Falls back to [`Sentiment::Neutral`].

use std::sync::Arc;

use tracing::info;
use tutordesk_config::model::LlmConfig;
use tutordesk_core::{log_preview, ProviderAdapter, Sentiment, StageOutcome};

use crate::prompts::sentiment_prompt;
use crate::stage::resolve_label;

/// LLM-backed sentiment scorer.
pub struct SentimentScorer {
    provider: Arc<dyn ProviderAdapter>,
    llm: LlmConfig,
}

impl SentimentScorer {
    pub fn new(provider: Arc<dyn ProviderAdapter>, llm: &LlmConfig) -> Self {
        Self {
            provider,
            llm: llm.clone(),
        }
    }

    /// Scores `query`. Always yields a sentiment.
    pub async fn score(&self, query: &str) -> StageOutcome<Sentiment> {
        info!(query = log_preview(query, 100), "analyzing sentiment");

        let outcome = resolve_label(
            self.provider.as_ref(),
            &self.llm,
            sentiment_prompt(query),
            "sentiment",
        )
        .await;

        info!(sentiment = %outcome.value, fallback = outcome.is_fallback(), "sentiment analyzed");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutordesk_core::FallbackReason;
    use tutordesk_test_utils::MockProvider;

    fn scorer(provider: &MockProvider) -> SentimentScorer {
        SentimentScorer::new(Arc::new(provider.clone()), &LlmConfig::default())
    }

    #[tokio::test]
    async fn negative_is_recognized() {
        let provider = MockProvider::with_responses(["Negative"]);
        let outcome = scorer(&provider)
            .score("I'm really unhappy, the lesson portal is not loading!")
            .await;
        assert_eq!(outcome.value, Sentiment::Negative);
        assert!(!outcome.is_fallback());
    }

    #[tokio::test]
    async fn explanation_instead_of_label_defaults_to_neutral() {
        let provider = MockProvider::with_responses(["The sentiment is Positive"]);
        let outcome = scorer(&provider).score("Thanks so much!").await;
        assert_eq!(outcome.value, Sentiment::Neutral);
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::Unrecognized { .. })
        ));
    }

    #[tokio::test]
    async fn failure_defaults_to_neutral() {
        let provider = MockProvider::failing("timeout");
        let outcome = scorer(&provider).score("anything").await;
        assert_eq!(outcome.value, Sentiment::Neutral);
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::ProviderUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn prompt_carries_query() {
        let provider = MockProvider::with_responses(["Positive"]);
        scorer(&provider).score("Thanks for the maths practice 😊").await;
        let prompts = provider.prompts().await;
        assert!(prompts[0].contains("Customer Query:\nThanks for the maths practice 😊\n"));
    }
}
