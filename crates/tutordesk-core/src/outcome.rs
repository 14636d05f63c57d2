// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stage results that never fail outward but still say how they were produced.
//!
//! Every pipeline stage returns a usable value. [`Resolution`] records whether
//! that value came from the model or from the stage's hard-coded default, and
//! [`FallbackReason`] separates "the model was unreachable" from "the model
//! answered with something unusable".

use serde::Serialize;

/// Why a stage substituted its default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The provider or knowledge base call failed.
    ProviderUnavailable { error: String },
    /// The model answered with text outside the closed label set.
    Unrecognized { raw: String },
    /// The model answered with nothing but whitespace.
    EmptyResponse,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::ProviderUnavailable { error } => write!(f, "unavailable: {error}"),
            FallbackReason::Unrecognized { raw } => write!(f, "unrecognized output `{raw}`"),
            FallbackReason::EmptyResponse => write!(f, "empty response"),
        }
    }
}

/// How a stage value was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Taken from a valid model answer.
    Model,
    /// Substituted default.
    Fallback(FallbackReason),
}

/// A stage value together with its [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageOutcome<T> {
    pub value: T,
    pub resolution: Resolution,
}

impl<T> StageOutcome<T> {
    /// Value produced from a valid model answer.
    pub fn model(value: T) -> Self {
        Self {
            value,
            resolution: Resolution::Model,
        }
    }

    /// Default value substituted for the given reason.
    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Self {
            value,
            resolution: Resolution::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.resolution, Resolution::Fallback(_))
    }

    /// The fallback reason, if any.
    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match &self.resolution {
            Resolution::Model => None,
            Resolution::Fallback(reason) => Some(reason),
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_outcome_has_no_reason() {
        let outcome = StageOutcome::model(3);
        assert!(!outcome.is_fallback());
        assert!(outcome.fallback_reason().is_none());
        assert_eq!(outcome.into_value(), 3);
    }

    #[test]
    fn fallback_outcome_keeps_reason() {
        let outcome = StageOutcome::fallback(
            "default",
            FallbackReason::Unrecognized { raw: "Maybe".into() },
        );
        assert!(outcome.is_fallback());
        assert_eq!(
            outcome.fallback_reason().unwrap().to_string(),
            "unrecognized output `Maybe`"
        );
    }

    #[test]
    fn resolution_serializes_with_tags() {
        let outcome = StageOutcome::fallback(1, FallbackReason::EmptyResponse);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["resolution"]["kind"], "fallback");
        assert_eq!(json["resolution"]["reason"], "empty_response");

        let json = serde_json::to_value(StageOutcome::model(1)).unwrap();
        assert_eq!(json["resolution"]["kind"], "model");
    }
}
