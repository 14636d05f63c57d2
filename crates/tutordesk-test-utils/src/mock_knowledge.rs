// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock knowledge base with canned documents and search capture.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tutordesk_core::traits::{KnowledgeBase, PluginAdapter};
use tutordesk_core::types::{AdapterType, HealthStatus, KnowledgeDocument, QueryCategory};
use tutordesk_core::TutordeskError;

/// A recorded `search` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCall {
    pub query: String,
    pub category: Option<QueryCategory>,
}

/// A knowledge base that returns the same documents for every search,
/// or fails every search when constructed with [`MockKnowledgeBase::failing`].
///
/// The category filter is recorded but not applied.
#[derive(Clone, Default)]
pub struct MockKnowledgeBase {
    documents: Vec<KnowledgeDocument>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<SearchCall>>>,
}

impl MockKnowledgeBase {
    /// An empty knowledge base: every search returns no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// A knowledge base returning `documents` for every search.
    pub fn with_documents(documents: Vec<KnowledgeDocument>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    /// A knowledge base whose every search fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// All searches received so far, oldest first.
    pub async fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockKnowledgeBase {
    fn name(&self) -> &str {
        "mock-knowledge"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Knowledge
    }

    async fn health_check(&self) -> Result<HealthStatus, TutordeskError> {
        Ok(match &self.failure {
            Some(message) => HealthStatus::Unhealthy(message.clone()),
            None => HealthStatus::Healthy,
        })
    }
}

#[async_trait]
impl KnowledgeBase for MockKnowledgeBase {
    async fn search(
        &self,
        query: &str,
        category: Option<QueryCategory>,
    ) -> Result<Vec<KnowledgeDocument>, TutordeskError> {
        self.calls.lock().await.push(SearchCall {
            query: query.to_string(),
            category,
        });

        match &self.failure {
            Some(message) => Err(TutordeskError::Knowledge {
                message: message.clone(),
                source: None,
            }),
            None => Ok(self.documents.clone()),
        }
    }
}
