// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category response handlers.
//!
//! A handler retrieves supporting documents, renders them into a context
//! block, and asks the model for the final answer. It never fails: any
//! retrieval or model error, and an empty answer, yield the category's
//! apology naming its contact address.

use std::sync::Arc;

use tracing::{error, info, warn};
use tutordesk_config::model::LlmConfig;
use tutordesk_core::types::KnowledgeDocument;
use tutordesk_core::{
    log_preview, FallbackReason, KnowledgeBase, ProviderAdapter, QueryCategory, StageOutcome,
    SupportRequest, TutordeskError,
};

use crate::prompts::response_prompt;
use crate::stage::complete_trimmed;

/// Context text used when retrieval returns nothing.
pub fn no_results_message(category: QueryCategory) -> &'static str {
    match category {
        QueryCategory::Academic => "No specific documentation found for this query.",
        QueryCategory::Billing => "No specific billing information found for this query.",
        QueryCategory::General => "No specific information found for this query.",
    }
}

/// Fixed answer returned when a handler cannot produce one.
pub fn apology(category: QueryCategory) -> &'static str {
    match category {
        QueryCategory::Academic => {
            "I apologize, but I encountered an error while processing your academic question. \
             Please contact our academic support team at support@company.com for immediate assistance."
        }
        QueryCategory::Billing => {
            "I apologize, but I encountered an error while processing your billing question. \
             Please contact our billing team at billing@company.com for immediate assistance."
        }
        QueryCategory::General => {
            "I apologize, but I encountered an error while processing your question. \
             Please contact our support team at support@company.com for assistance."
        }
    }
}

/// Renders retrieved documents as `[Source: ...]` blocks separated by blank lines.
///
/// Returns the category's no-results sentence when `documents` is empty.
pub fn format_context(category: QueryCategory, documents: &[KnowledgeDocument]) -> String {
    if documents.is_empty() {
        return no_results_message(category).to_string();
    }
    documents
        .iter()
        .map(|doc| format!("[Source: {}]\n{}", doc.source_label(), doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Why a handler fell back to its apology.
enum HandlerFailure {
    Error(TutordeskError),
    Empty,
}

impl From<TutordeskError> for HandlerFailure {
    fn from(e: TutordeskError) -> Self {
        HandlerFailure::Error(e)
    }
}

/// Retrieval-augmented responder for one category.
pub struct ResponseHandler {
    category: QueryCategory,
    provider: Arc<dyn ProviderAdapter>,
    knowledge: Arc<dyn KnowledgeBase>,
    llm: LlmConfig,
}

impl ResponseHandler {
    pub fn new(
        category: QueryCategory,
        provider: Arc<dyn ProviderAdapter>,
        knowledge: Arc<dyn KnowledgeBase>,
        llm: &LlmConfig,
    ) -> Self {
        Self {
            category,
            provider,
            knowledge,
            llm: llm.clone(),
        }
    }

    /// The category this handler answers for.
    pub fn category(&self) -> QueryCategory {
        self.category
    }

    /// Retrieval filter for a record classified as `record_category`.
    ///
    /// Filters on this handler's own category only when the record carries
    /// that same category; any other record searches unfiltered.
    pub fn filter_for(&self, record_category: Option<QueryCategory>) -> Option<QueryCategory> {
        (record_category == Some(self.category)).then_some(self.category)
    }

    /// Produces the final answer for `request`. Always non-empty.
    pub async fn respond(&self, request: &SupportRequest) -> StageOutcome<String> {
        let query = request.customer_query();
        info!(
            handler = self.category.short_name(),
            query = log_preview(query, 100),
            "generating response"
        );

        match self.try_respond(request).await {
            Ok(answer) => {
                info!(handler = self.category.short_name(), "response generated");
                StageOutcome::model(answer)
            }
            Err(HandlerFailure::Empty) => {
                warn!(handler = self.category.short_name(), "model returned an empty answer");
                StageOutcome::fallback(
                    apology(self.category).to_string(),
                    FallbackReason::EmptyResponse,
                )
            }
            Err(HandlerFailure::Error(e)) => {
                error!(handler = self.category.short_name(), error = %e, "response generation failed");
                StageOutcome::fallback(
                    apology(self.category).to_string(),
                    FallbackReason::ProviderUnavailable {
                        error: e.to_string(),
                    },
                )
            }
        }
    }

    async fn try_respond(&self, request: &SupportRequest) -> Result<String, HandlerFailure> {
        let query = request.customer_query();
        let filter = self.filter_for(request.query_category());
        let documents = self.knowledge.search(query, filter).await?;

        let context = format_context(self.category, &documents);
        let prompt = response_prompt(self.category, &context, query);
        let answer = complete_trimmed(self.provider.as_ref(), &self.llm, prompt).await?;

        if answer.is_empty() {
            return Err(HandlerFailure::Empty);
        }
        Ok(answer)
    }
}
