//! Behavioural traces recorded for a team during evaluation.
//!
//! Every trace is optional: environments only produce the encodings their
//! configured diversity metrics need. Distance metrics report a
//! [`ModelError::MissingEncoding`](crate::ModelError::MissingEncoding) instead of
//! guessing when a trace they depend on was never produced.
//!
//! | Encoding                 | Shape                          | Consumers              |
//! |--------------------------|--------------------------------|------------------------|
//! | `actions_per_match`      | action indices, in play order  | entropy, NCD           |
//! | `custom_info_per_match`  | richer per-action tokens       | NCD (custom)           |
//! | `pattern_per_match`      | fixed-length numeric vector    | Hamming, Euclidean     |

use serde::{Deserialize, Serialize};

/// Named behavioural encoding, used to report which trace is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum EncodingKind {
    #[display("actions_per_match")]
    ActionsPerMatch,
    #[display("custom_info_per_match")]
    CustomInfoPerMatch,
    #[display("pattern_per_match")]
    PatternPerMatch,
}

/// Behavioural encodings of a team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encodings {
    /// Discrete actions (indices into the action alphabet) taken across all matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions_per_match: Option<Vec<u8>>,
    /// Per-action tokens carrying more context than the bare action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_info_per_match: Option<Vec<String>>,
    /// Fixed-length numeric pattern (usually bin indices) summarizing play.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_per_match: Option<Vec<f64>>,
}

impl Encodings {
    /// Returns the action sequence, treating an empty sequence as absent.
    #[must_use]
    pub fn actions_per_match(&self) -> Option<&[u8]> {
        self.actions_per_match
            .as_deref()
            .filter(|actions| !actions.is_empty())
    }

    /// Returns the custom trace, treating an empty trace as absent.
    #[must_use]
    pub fn custom_info_per_match(&self) -> Option<&[String]> {
        self.custom_info_per_match
            .as_deref()
            .filter(|tokens| !tokens.is_empty())
    }

    /// Returns the pattern vector, treating an empty vector as absent.
    #[must_use]
    pub fn pattern_per_match(&self) -> Option<&[f64]> {
        self.pattern_per_match
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
    }
}
