// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests: converter output feeding the knowledge store.

use tutordesk_config::model::{KnowledgeConfig, KnowledgeSourceConfig};
use tutordesk_core::{KnowledgeBase, QueryCategory};
use tutordesk_knowledge::{convert_file, KnowledgeStore};

const CURRICULUM: &str = r#"[
  {
    "year": 7,
    "key_stage": "KS3",
    "age_range": "11-12",
    "foundation_subjects": ["Geography", "Computing"],
    "core_subjects": [
      {"subject": "Maths", "focus": "negative numbers and simple equations"},
      {"subject": "Science", "focus": "cells and particles"}
    ]
  },
  {
    "year": 8,
    "key_stage": "KS3",
    "age_range": "12-13",
    "foundation_subjects": ["History"],
    "core_subjects": [
      {"subject": "Maths", "focus": "fractions"}
    ]
  }
]"#;

const BILLING_DOCS: &str = r#"{
  "documents": [
    {"text": "Download invoices from Account, then Billing, then Invoices.", "metadata": {"source": "billing-faq"}},
    {"text": "Refunds are issued to the original card within 5 working days.", "metadata": {}}
  ]
}"#;

fn source(path: &std::path::Path, category: QueryCategory, label: &str) -> KnowledgeSourceConfig {
    KnowledgeSourceConfig {
        path: path.display().to_string(),
        category: Some(category),
        source: Some(label.to_string()),
    }
}

#[tokio::test]
async fn converted_curriculum_is_searchable() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("courses.json");
    let output = dir.path().join("out").join("documents.json");
    std::fs::write(&input, CURRICULUM).unwrap();

    let count = convert_file(&input, &output).await.unwrap();
    assert_eq!(count, 3);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Year 8 Maths focuses on fractions."));
    // Metadata keeps the record's field order.
    let year = written.find("\"year\"").unwrap();
    let topic = written.find("\"topic\"").unwrap();
    assert!(year < topic);

    let config = KnowledgeConfig {
        top_k: 4,
        sources: vec![source(&output, QueryCategory::Academic, "UK curriculum")],
    };
    let store = KnowledgeStore::load(&config).await.unwrap();
    assert_eq!(store.len(), 3);

    let hits = store
        .search("what topic you teach in maths for year 8?", Some(QueryCategory::Academic))
        .await
        .unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0].content, "Year 8 Maths focuses on fractions.");
    assert_eq!(hits[0].source_label(), "UK curriculum");
}

#[tokio::test]
async fn source_defaults_do_not_override_document_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let billing = dir.path().join("billing.json");
    std::fs::write(&billing, BILLING_DOCS).unwrap();

    let config = KnowledgeConfig {
        top_k: 4,
        sources: vec![source(&billing, QueryCategory::Billing, "billing handbook")],
    };
    let store = KnowledgeStore::load(&config).await.unwrap();

    let invoices = store.search("invoices", None).await.unwrap();
    assert_eq!(invoices[0].source_label(), "billing-faq");
    assert_eq!(invoices[0].category(), Some(QueryCategory::Billing));

    let refunds = store.search("refunds", Some(QueryCategory::Billing)).await.unwrap();
    assert_eq!(refunds[0].source_label(), "billing handbook");

    assert!(store
        .search("refunds", Some(QueryCategory::General))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn missing_source_file_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = KnowledgeConfig {
        top_k: 4,
        sources: vec![source(
            &dir.path().join("absent.json"),
            QueryCategory::General,
            "x",
        )],
    };
    let err = KnowledgeStore::load(&config).await.unwrap_err();
    assert!(err.to_string().contains("failed to read knowledge source"), "got: {err}");
}

#[tokio::test]
async fn malformed_source_file_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let config = KnowledgeConfig {
        top_k: 4,
        sources: vec![source(&path, QueryCategory::General, "x")],
    };
    let err = KnowledgeStore::load(&config).await.unwrap_err();
    assert!(err.to_string().contains("failed to parse knowledge source"), "got: {err}");
}
