// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutordesk ask`, `classify` and `sentiment` command implementations.

use std::io::IsTerminal;
use std::sync::Arc;

use colored::Colorize;
use tutordesk_config::TutordeskConfig;
use tutordesk_core::{KnowledgeBase, ProviderAdapter, StageOutcome, TutordeskError};
use tutordesk_knowledge::KnowledgeStore;
use tutordesk_openai::OpenAiProvider;
use tutordesk_router::{QueryClassifier, SentimentScorer, SupportOutcome, SupportPipeline};

/// Builds the provider from `[llm]`.
pub(crate) fn build_provider(
    config: &TutordeskConfig,
) -> Result<Arc<dyn ProviderAdapter>, TutordeskError> {
    Ok(Arc::new(OpenAiProvider::new(&config.llm)?))
}

/// Builds the full pipeline: provider plus a knowledge store loaded from `[knowledge]`.
pub(crate) async fn build_pipeline(
    config: &TutordeskConfig,
) -> Result<SupportPipeline, TutordeskError> {
    let provider = build_provider(config)?;
    let knowledge: Arc<dyn KnowledgeBase> =
        Arc::new(KnowledgeStore::load(&config.knowledge).await?);
    Ok(SupportPipeline::new(config, provider, knowledge))
}

/// Runs `tutordesk ask`.
pub async fn run_ask(config: &TutordeskConfig, query: &str, json: bool) -> Result<(), TutordeskError> {
    let pipeline = build_pipeline(config).await?;
    let outcome = pipeline.handle(query).await?;

    if json {
        let body = serde_json::to_string_pretty(&outcome)
            .map_err(|e| TutordeskError::Internal(format!("failed to serialize outcome: {e}")))?;
        println!("{body}");
    } else {
        print!("{}", render_outcome(&outcome, std::io::stdout().is_terminal()));
    }
    Ok(())
}

/// Runs `tutordesk classify`.
pub async fn run_classify(config: &TutordeskConfig, query: &str) -> Result<(), TutordeskError> {
    let classifier = QueryClassifier::new(build_provider(config)?, &config.llm);
    let outcome = classifier.classify(query).await;
    println!("{}", render_stage(&outcome));
    Ok(())
}

/// Runs `tutordesk sentiment`.
pub async fn run_sentiment(config: &TutordeskConfig, query: &str) -> Result<(), TutordeskError> {
    let scorer = SentimentScorer::new(build_provider(config)?, &config.llm);
    let outcome = scorer.score(query).await;
    println!("{}", render_stage(&outcome));
    Ok(())
}

/// One stage value, with the fallback reason appended when a default was used.
pub(crate) fn render_stage<T: std::fmt::Display>(outcome: &StageOutcome<T>) -> String {
    match outcome.fallback_reason() {
        Some(reason) => format!("{} (default: {reason})", outcome.value),
        None => outcome.value.to_string(),
    }
}

/// Human-readable summary of a routed query.
pub(crate) fn render_outcome(outcome: &SupportOutcome, color: bool) -> String {
    let label = |text: &str| {
        if color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    let mut out = format!("{} {}\n", label("category: "), render_stage(&outcome.category));
    if let Some(sentiment) = &outcome.sentiment {
        out.push_str(&format!("{} {}\n", label("sentiment:"), render_stage(sentiment)));
    }
    out.push('\n');
    out.push_str(outcome.answer());
    out.push('\n');

    if let Some(reason) = outcome.response.fallback_reason() {
        let note = format!("(fallback answer: {reason})");
        out.push_str(&if color { note.dimmed().to_string() } else { note });
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutordesk_core::{FallbackReason, QueryCategory, Sentiment, SupportRequest};

    fn outcome(sentiment: Option<StageOutcome<Sentiment>>, response: StageOutcome<String>) -> SupportOutcome {
        SupportOutcome {
            request: SupportRequest::new("q"),
            category: StageOutcome::model(QueryCategory::Billing),
            sentiment,
            response,
        }
    }

    #[test]
    fn stage_rendering_notes_defaults() {
        assert_eq!(render_stage(&StageOutcome::model(Sentiment::Positive)), "Positive");
        let fallback = StageOutcome::fallback(QueryCategory::General, FallbackReason::EmptyResponse);
        assert_eq!(
            render_stage(&fallback),
            "General / Teaching Assistance (default: empty response)"
        );
    }

    #[test]
    fn plain_outcome_lists_labels_then_answer() {
        let rendered = render_outcome(
            &outcome(
                Some(StageOutcome::model(Sentiment::Neutral)),
                StageOutcome::model("See Account > Billing.".to_string()),
            ),
            false,
        );
        assert_eq!(
            rendered,
            "category:  Billing, Payments & Administrative\n\
             sentiment: Neutral\n\
             \n\
             See Account > Billing.\n"
        );
    }

    #[test]
    fn fallback_answer_is_annotated() {
        let rendered = render_outcome(
            &outcome(
                None,
                StageOutcome::fallback(
                    "Sorry".to_string(),
                    FallbackReason::ProviderUnavailable { error: "offline".into() },
                ),
            ),
            false,
        );
        assert!(!rendered.contains("sentiment:"));
        assert!(rendered.ends_with("Sorry\n(fallback answer: unavailable: offline)\n"));
    }
}
