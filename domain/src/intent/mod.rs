//! Intent resolution domain module
//!
//! Types produced by the intent resolvers (deterministic or LLM-assisted)
//! and the pure logic that post-processes their output: confidence banding
//! and conservative filename normalization.

pub mod confidence;
pub mod entities;
pub mod normalizer;

pub use confidence::{Confidence, ConfidenceBand};
pub use entities::{RequestContext, ResolutionResult, ValidationResult};
pub use normalizer::normalize_file_path;
