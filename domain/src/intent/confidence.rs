//! Resolver confidence scores and gating bands

use serde::{Deserialize, Serialize};

/// Below this, a resolution is rejected outright.
pub const LOW_THRESHOLD: f64 = 0.5;

/// At or above this, a resolution proceeds without a validation pass.
pub const HIGH_THRESHOLD: f64 = 0.7;

/// A resolver's certainty in its tool/parameter selection, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a confidence score, clamped into `[0, 1]`.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Definite confidence, used by deterministic strategies that compute
    /// no score and always proceed.
    pub fn definite() -> Self {
        Self(1.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The gating band this score falls into.
    ///
    /// Boundaries are inclusive-low: exactly 0.5 validates, exactly 0.7
    /// proceeds.
    pub fn band(&self) -> ConfidenceBand {
        if self.0 < LOW_THRESHOLD {
            ConfidenceBand::Reject
        } else if self.0 < HIGH_THRESHOLD {
            ConfidenceBand::Validate
        } else {
            ConfidenceBand::Proceed
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// What the dispatcher does with a resolution at a given confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// Reject immediately, surfacing the resolver's reasoning.
    Reject,
    /// Run the second-pass validation before continuing.
    Validate,
    /// Proceed directly to execution.
    Proceed,
}
