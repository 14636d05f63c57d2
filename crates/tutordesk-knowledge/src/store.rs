// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only knowledge store implementing [`KnowledgeBase`].
//!
//! Documents are loaded from `{"documents": [...]}` files listed under
//! `[[knowledge.sources]]`, tagged with per-source defaults, and indexed
//! once into an in-memory SQLite FTS5 table. Searches rank with FTS5's
//! `bm25()` and never mutate the store, so it can be shared by reference
//! across handlers.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::Connection;
use tracing::{debug, info};
use tutordesk_config::model::{KnowledgeConfig, KnowledgeSourceConfig};
use tutordesk_core::traits::{KnowledgeBase, PluginAdapter};
use tutordesk_core::types::{AdapterType, HealthStatus, KnowledgeDocument, QueryCategory};
use tutordesk_core::{log_preview, TutordeskError};

/// FTS5 index over document bodies. `rowid` is the document's load position;
/// `category` holds the parsed category label, or NULL.
const SCHEMA: &str = "CREATE VIRTUAL TABLE knowledge_fts USING fts5(
    content,
    category UNINDEXED
);";

/// FTS5 `bm25()` is negative, more negative meaning more relevant.
/// Ties keep load order.
const SEARCH_SQL: &str = "SELECT rowid FROM knowledge_fts \
     WHERE knowledge_fts MATCH ?1 AND (?2 IS NULL OR category = ?2) \
     ORDER BY bm25(knowledge_fts), rowid LIMIT ?3";

/// Convert tokio-rusqlite errors into knowledge base errors.
fn index_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> TutordeskError {
    TutordeskError::Knowledge {
        message: format!("knowledge index error: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Builds an FTS5 query matching any word of `query`.
///
/// Each word is quoted so punctuation and FTS5 operators in customer text
/// (`?`, `-`, `OR`, `NEAR`) are taken literally. Returns `None` when the
/// query has no words.
pub fn match_expression(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{}\"", t.to_lowercase()))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

/// On-disk document list, shared with the curriculum converter's output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSet {
    pub documents: Vec<KnowledgeDocument>,
}

/// In-memory knowledge store backed by an SQLite FTS5 index.
pub struct KnowledgeStore {
    conn: Connection,
    documents: Vec<KnowledgeDocument>,
    top_k: usize,
}

impl std::fmt::Debug for KnowledgeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeStore")
            .field("documents", &self.documents.len())
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl KnowledgeStore {
    /// Builds a store over already-tagged documents.
    pub async fn from_documents(
        documents: Vec<KnowledgeDocument>,
        top_k: usize,
    ) -> Result<Self, TutordeskError> {
        let conn = Connection::open_in_memory().await.map_err(|e| index_err(tokio_rusqlite::Error::Error(e)))?;

        let rows: Vec<(i64, String, Option<&'static str>)> = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (i as i64, doc.content.clone(), doc.category().map(|c| c.label())))
            .collect();

        conn.call(move |conn| {
            conn.execute_batch(SCHEMA)?;
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO knowledge_fts(rowid, content, category) VALUES (?1, ?2, ?3)",
                )?;
                for (rowid, content, category) in &rows {
                    stmt.execute(rusqlite::params![rowid, content, category])?;
                }
            }
            tx.commit()
        })
        .await
        .map_err(index_err)?;

        Ok(Self {
            conn,
            documents,
            top_k,
        })
    }

    /// Loads every configured source, in order, and indexes the union.
    ///
    /// A missing or malformed source file fails the whole load.
    pub async fn load(config: &KnowledgeConfig) -> Result<Self, TutordeskError> {
        let mut documents = Vec::new();
        for source in &config.sources {
            let loaded = load_source(source).await?;
            info!(path = %source.path, documents = loaded.len(), "knowledge source loaded");
            documents.extend(loaded);
        }
        Self::from_documents(documents, config.top_k).await
    }

    /// Number of documents held.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of documents without a valid `category`.
    ///
    /// Handler searches filter on the dispatched category, so these
    /// documents are only reachable through unfiltered searches.
    pub fn uncategorized(&self) -> usize {
        self.documents.iter().filter(|d| d.category().is_none()).count()
    }

    /// Top `top_k` documents matching `query`, restricted to `category` when given.
    pub async fn rank(
        &self,
        query: &str,
        category: Option<QueryCategory>,
    ) -> Result<Vec<KnowledgeDocument>, TutordeskError> {
        let Some(expression) = match_expression(query) else {
            return Ok(Vec::new());
        };
        let filter = category.map(|c| c.label());
        let limit = i64::try_from(self.top_k).unwrap_or(i64::MAX);

        let rowids = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(SEARCH_SQL)?;
                let rowids = stmt
                    .query_map(rusqlite::params![expression, filter, limit], |row| {
                        row.get::<_, i64>(0)
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rowids)
            })
            .await
            .map_err(index_err)?;

        Ok(rowids
            .into_iter()
            .filter_map(|rowid| usize::try_from(rowid).ok())
            .filter_map(|i| self.documents.get(i).cloned())
            .collect())
    }
}

/// Reads one source file and applies its default category and source label
/// to documents that do not carry their own.
async fn load_source(
    source: &KnowledgeSourceConfig,
) -> Result<Vec<KnowledgeDocument>, TutordeskError> {
    let path = Path::new(&source.path);
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TutordeskError::Knowledge {
            message: format!("failed to read knowledge source {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;

    let set: DocumentSet = serde_json::from_str(&raw).map_err(|e| TutordeskError::Knowledge {
        message: format!("failed to parse knowledge source {}: {e}", path.display()),
        source: Some(Box::new(e)),
    })?;

    Ok(set
        .documents
        .into_iter()
        .map(|mut doc| {
            if let Some(category) = source.category {
                doc.metadata
                    .entry("category")
                    .or_insert_with(|| category.label().into());
            }
            if let Some(label) = &source.source {
                doc.metadata
                    .entry("source")
                    .or_insert_with(|| label.clone().into());
            }
            doc
        })
        .collect())
}

#[async_trait]
impl PluginAdapter for KnowledgeStore {
    fn name(&self) -> &str {
        "fts5-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Knowledge
    }

    async fn health_check(&self) -> Result<HealthStatus, TutordeskError> {
        if self.is_empty() {
            return Ok(HealthStatus::Degraded("no documents loaded".into()));
        }
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl KnowledgeBase for KnowledgeStore {
    async fn search(
        &self,
        query: &str,
        category: Option<QueryCategory>,
    ) -> Result<Vec<KnowledgeDocument>, TutordeskError> {
        let hits = self.rank(query, category).await?;
        debug!(
            query = log_preview(query, 100),
            filter = category.map(|c| c.short_name()),
            hits = hits.len(),
            "knowledge search"
        );
        Ok(hits)
    }
}
