// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tutordesk tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock LLM provider with scripted replies and request capture
//! - [`MockKnowledgeBase`] - Mock retrieval with canned documents and search capture

pub mod mock_knowledge;
pub mod mock_provider;

pub use mock_knowledge::{MockKnowledgeBase, SearchCall};
pub use mock_provider::{MockProvider, MockReply, DEFAULT_MOCK_RESPONSE};
