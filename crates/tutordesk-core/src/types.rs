// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the routing pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::TutordeskError;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Knowledge,
}

// --- Routing labels ---

/// Support category assigned to a customer query by the classifier.
///
/// Display and `FromStr` use the exact labels the classifier prompt asks the
/// model to emit. Parsing is case-sensitive. Deserialization additionally
/// accepts the short names (`academic`, `billing`, `general`) so config files
/// stay readable.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum QueryCategory {
    /// Curriculum structure, topics by year group, performance analytics.
    #[strum(serialize = "Academic & Curriculum Analytics")]
    #[serde(rename = "Academic & Curriculum Analytics", alias = "academic")]
    Academic,
    /// Pricing, invoices, refunds, subscriptions, account administration.
    #[strum(serialize = "Billing, Payments & Administrative")]
    #[serde(rename = "Billing, Payments & Administrative", alias = "billing")]
    Billing,
    /// Teaching material preparation and everything else.
    #[default]
    #[strum(serialize = "General / Teaching Assistance")]
    #[serde(rename = "General / Teaching Assistance", alias = "general")]
    General,
}

impl QueryCategory {
    /// Every category, in prompt order.
    pub const ALL: [QueryCategory; 3] = [
        QueryCategory::Academic,
        QueryCategory::Billing,
        QueryCategory::General,
    ];

    /// Exact label text.
    pub fn label(&self) -> &'static str {
        match self {
            QueryCategory::Academic => "Academic & Curriculum Analytics",
            QueryCategory::Billing => "Billing, Payments & Administrative",
            QueryCategory::General => "General / Teaching Assistance",
        }
    }

    /// Lowercase single-word name used in logs and CLI output.
    pub fn short_name(&self) -> &'static str {
        match self {
            QueryCategory::Academic => "academic",
            QueryCategory::Billing => "billing",
            QueryCategory::General => "general",
        }
    }

    /// Contact address quoted in the handler's apology message.
    pub fn contact_address(&self) -> &'static str {
        match self {
            QueryCategory::Academic => "support@company.com",
            QueryCategory::Billing => "billing@company.com",
            QueryCategory::General => "support@company.com",
        }
    }
}

/// Emotional tone of a customer query.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Every sentiment, in prompt order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];
}

// --- Request record ---

/// Request-scoped record threaded through the routing pipeline.
///
/// Each stage-owned field can be written once. A second write returns
/// [`TutordeskError::RecordField`] and leaves the first value in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportRequest {
    customer_query: String,
    query_category: Option<QueryCategory>,
    query_sentiment: Option<Sentiment>,
    final_response: Option<String>,
}

impl SupportRequest {
    /// Creates a record for an incoming query with every stage field unset.
    pub fn new(customer_query: impl Into<String>) -> Self {
        Self {
            customer_query: customer_query.into(),
            query_category: None,
            query_sentiment: None,
            final_response: None,
        }
    }

    pub fn customer_query(&self) -> &str {
        &self.customer_query
    }

    pub fn query_category(&self) -> Option<QueryCategory> {
        self.query_category
    }

    pub fn query_sentiment(&self) -> Option<Sentiment> {
        self.query_sentiment
    }

    pub fn final_response(&self) -> Option<&str> {
        self.final_response.as_deref()
    }

    /// Records the classifier's decision.
    pub fn set_category(&mut self, category: QueryCategory) -> Result<(), TutordeskError> {
        set_once(&mut self.query_category, category, "query_category")
    }

    /// Records the sentiment scorer's decision.
    pub fn set_sentiment(&mut self, sentiment: Sentiment) -> Result<(), TutordeskError> {
        set_once(&mut self.query_sentiment, sentiment, "query_sentiment")
    }

    /// Records the handler's answer.
    pub fn set_final_response(&mut self, response: String) -> Result<(), TutordeskError> {
        set_once(&mut self.final_response, response, "final_response")
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, field: &'static str) -> Result<(), TutordeskError> {
    if slot.is_some() {
        return Err(TutordeskError::RecordField { field });
    }
    *slot = Some(value);
    Ok(())
}

// --- Provider types ---

/// A single message in a provider conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    /// Role: "system", "user" or "assistant".
    pub role: String,
    /// Plain text content.
    pub content: String,
}

impl ProviderMessage {
    /// Convenience constructor for a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A request to an LLM provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Model identifier.
    pub model: String,
    /// Optional system prompt sent ahead of the messages.
    pub system_prompt: Option<String>,
    /// Conversation messages.
    pub messages: Vec<ProviderMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature. `None` leaves the provider default.
    pub temperature: Option<f32>,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A response from an LLM provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub id: String,
    /// Generated text, untrimmed.
    pub content: String,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: TokenUsage,
}

// --- Knowledge types ---

/// Source label rendered for documents that carry no `source` metadata.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// A document returned by the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Document body.
    #[serde(rename = "text")]
    pub content: String,
    /// Free-form metadata. `source` and `category` are interpreted.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl KnowledgeDocument {
    /// Creates a document with empty metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Builder-style metadata insertion.
    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// The `source` metadata string, or `Unknown`.
    pub fn source_label(&self) -> &str {
        self.metadata
            .get("source")
            .and_then(|v| v.as_str())
            .unwrap_or(UNKNOWN_SOURCE)
    }

    /// The `category` metadata parsed as a [`QueryCategory`], if present and valid.
    pub fn category(&self) -> Option<QueryCategory> {
        self.metadata
            .get("category")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }
}
