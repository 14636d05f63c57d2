// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end routing: classify, optionally score sentiment, dispatch.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use tutordesk_config::TutordeskConfig;
use tutordesk_core::{
    KnowledgeBase, ProviderAdapter, QueryCategory, Sentiment, StageOutcome, SupportRequest,
    TutordeskError,
};

use crate::classifier::QueryClassifier;
use crate::handlers::ResponseHandler;
use crate::sentiment::SentimentScorer;

/// The populated record plus how each stage resolved.
#[derive(Debug, Clone, Serialize)]
pub struct SupportOutcome {
    pub request: SupportRequest,
    pub category: StageOutcome<QueryCategory>,
    /// `None` when sentiment scoring is disabled.
    pub sentiment: Option<StageOutcome<Sentiment>>,
    pub response: StageOutcome<String>,
}

impl SupportOutcome {
    /// The final answer text.
    pub fn answer(&self) -> &str {
        &self.response.value
    }

    /// Whether any stage substituted its default.
    pub fn used_fallback(&self) -> bool {
        self.category.is_fallback()
            || self.sentiment.as_ref().is_some_and(StageOutcome::is_fallback)
            || self.response.is_fallback()
    }
}

/// Owns one instance of every stage and runs them in order.
pub struct SupportPipeline {
    classifier: QueryClassifier,
    sentiment: Option<SentimentScorer>,
    academic: ResponseHandler,
    billing: ResponseHandler,
    general: ResponseHandler,
}

impl SupportPipeline {
    /// Wires every stage to the shared collaborators.
    pub fn new(
        config: &TutordeskConfig,
        provider: Arc<dyn ProviderAdapter>,
        knowledge: Arc<dyn KnowledgeBase>,
    ) -> Self {
        let llm = &config.llm;
        let handler = |category| {
            ResponseHandler::new(category, Arc::clone(&provider), Arc::clone(&knowledge), llm)
        };

        Self {
            classifier: QueryClassifier::new(Arc::clone(&provider), llm),
            sentiment: config
                .pipeline
                .analyze_sentiment
                .then(|| SentimentScorer::new(Arc::clone(&provider), llm)),
            academic: handler(QueryCategory::Academic),
            billing: handler(QueryCategory::Billing),
            general: handler(QueryCategory::General),
        }
    }

    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    /// The sentiment scorer, if enabled.
    pub fn sentiment(&self) -> Option<&SentimentScorer> {
        self.sentiment.as_ref()
    }

    /// The handler answering for `category`.
    pub fn handler(&self, category: QueryCategory) -> &ResponseHandler {
        match category {
            QueryCategory::Academic => &self.academic,
            QueryCategory::Billing => &self.billing,
            QueryCategory::General => &self.general,
        }
    }

    /// Routes one query through every stage.
    ///
    /// Stage failures never surface here; they are folded into the
    /// outcome's resolutions. The only error is a record field written
    /// twice, which indicates a wiring bug.
    pub async fn handle(&self, query: &str) -> Result<SupportOutcome, TutordeskError> {
        let mut request = SupportRequest::new(query);

        let category = self.classifier.classify(request.customer_query()).await;
        request.set_category(category.value)?;

        let sentiment = match &self.sentiment {
            Some(scorer) => {
                let outcome = scorer.score(request.customer_query()).await;
                request.set_sentiment(outcome.value)?;
                Some(outcome)
            }
            None => None,
        };

        let response = self.handler(category.value).respond(&request).await;
        request.set_final_response(response.value.clone())?;

        info!(
            category = category.value.short_name(),
            sentiment = ?sentiment.as_ref().map(|s| s.value),
            fallback = response.is_fallback(),
            "query routed"
        );

        Ok(SupportOutcome {
            request,
            category,
            sentiment,
            response,
        })
    }
}
