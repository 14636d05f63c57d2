// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge base for the Tutordesk support router.
//!
//! Provides the in-memory [`KnowledgeStore`] (SQLite FTS5 BM25 ranking with an
//! optional category filter) and the curriculum converter that produces its
//! document files.

pub mod curriculum;
pub mod store;

pub use curriculum::{convert_file, convert_records, CoreSubject, YearRecord};
pub use store::{match_expression, DocumentSet, KnowledgeStore};
