// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Curriculum converter: year records in, knowledge documents out.
//!
//! Input is a JSON array of year records, each listing core subjects with a
//! one-line focus. Every core subject becomes one document whose text reads
//! `Year {year} {subject} focuses on {focus}.`

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;
use tutordesk_core::{KnowledgeDocument, TutordeskError};

use crate::store::DocumentSet;

/// One school year in the source curriculum file.
#[derive(Debug, Clone, Deserialize)]
pub struct YearRecord {
    pub year: u32,
    #[serde(default)]
    pub key_stage: Option<String>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub foundation_subjects: Vec<String>,
    #[serde(default)]
    pub core_subjects: Vec<CoreSubject>,
}

/// A core subject and what the year covers in it.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreSubject {
    pub subject: String,
    pub focus: String,
}

/// Flattens year records into documents, preserving record and subject order.
pub fn convert_records(records: &[YearRecord]) -> Vec<KnowledgeDocument> {
    records
        .iter()
        .flat_map(|record| {
            let foundation = record.foundation_subjects.join(", ");
            record.core_subjects.iter().map(move |core| {
                let mut metadata = Map::new();
                metadata.insert("year".into(), Value::from(record.year));
                metadata.insert("key_stage".into(), Value::from(record.key_stage.clone()));
                metadata.insert("age_range".into(), Value::from(record.age_range.clone()));
                metadata.insert("subject".into(), Value::from(core.subject.clone()));
                metadata.insert("topic".into(), Value::from(core.focus.clone()));
                metadata.insert("foundation_subjects".into(), Value::from(foundation.clone()));

                KnowledgeDocument {
                    content: format!(
                        "Year {} {} focuses on {}.",
                        record.year, core.subject, core.focus
                    ),
                    metadata,
                }
            })
        })
        .collect()
}

/// Parses a JSON array of year records.
pub fn parse_records(json: &str) -> Result<Vec<YearRecord>, TutordeskError> {
    serde_json::from_str(json).map_err(|e| TutordeskError::Converter {
        message: format!("invalid curriculum records: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Renders documents as the pretty-printed `{"documents": [...]}` file body.
///
/// Two-space indentation; non-ASCII text is written as-is.
pub fn render_documents(documents: Vec<KnowledgeDocument>) -> Result<String, TutordeskError> {
    serde_json::to_string_pretty(&DocumentSet { documents }).map_err(|e| {
        TutordeskError::Converter {
            message: format!("failed to serialize documents: {e}"),
            source: Some(Box::new(e)),
        }
    })
}

/// Reads `input`, converts it, and writes the result to `output`.
///
/// Returns the number of documents written.
pub async fn convert_file(input: &Path, output: &Path) -> Result<usize, TutordeskError> {
    let raw = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| TutordeskError::Converter {
            message: format!("failed to read {}: {e}", input.display()),
            source: Some(Box::new(e)),
        })?;

    let records = parse_records(&raw)?;
    let documents = convert_records(&records);
    let count = documents.len();
    let body = render_documents(documents)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| TutordeskError::Converter {
                message: format!("failed to create {}: {e}", parent.display()),
                source: Some(Box::new(e)),
            })?;
    }

    tokio::fs::write(output, body)
        .await
        .map_err(|e| TutordeskError::Converter {
            message: format!("failed to write {}: {e}", output.display()),
            source: Some(Box::new(e)),
        })?;

    info!(
        records = records.len(),
        documents = count,
        output = %output.display(),
        "curriculum converted"
    );
    Ok(count)
}
