// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge base trait for document retrieval.

use async_trait::async_trait;

use crate::error::TutordeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{KnowledgeDocument, QueryCategory};

/// Retrieval collaborator used by the response handlers.
#[async_trait]
pub trait KnowledgeBase: PluginAdapter {
    /// Returns documents relevant to `query`, most relevant first.
    ///
    /// When `category` is `Some`, only documents tagged with that category
    /// are considered.
    async fn search(
        &self,
        query: &str,
        category: Option<QueryCategory>,
    ) -> Result<Vec<KnowledgeDocument>, TutordeskError>;
}
