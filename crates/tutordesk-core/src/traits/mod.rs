// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators of the router.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod knowledge;
pub mod provider;

pub use adapter::PluginAdapter;
pub use knowledge::KnowledgeBase;
pub use provider::ProviderAdapter;
