//! Intent Resolver port
//!
//! Defines the interface for mapping a free-text intent to a tool
//! selection. Two interchangeable strategies implement it: a deterministic
//! pattern-matcher and an LLM-assisted resolver. The strategy is chosen by
//! configuration at startup.

use async_trait::async_trait;
use switchboard_domain::{RequestContext, ResolutionResult, ToolCatalog, ValidationResult};
use thiserror::Error;

/// Errors that can occur during intent resolution
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No pattern or tool matched the intent.
    #[error("Could not map the request to a supported tool")]
    UnrecognizedIntent,

    /// A required parameter could not be determined. The message is
    /// user-facing verbatim.
    #[error("{0}")]
    MissingParameter(String),

    /// The structured-generation backend failed.
    #[error("Tool selection failed: {0}")]
    Generation(String),
}

/// Port for intent resolution
#[async_trait]
pub trait IntentResolverPort: Send + Sync {
    /// Resolve an intent to a tool selection with extracted parameters.
    async fn resolve(
        &self,
        intent: &str,
        context: &RequestContext,
        catalog: &ToolCatalog,
    ) -> Result<ResolutionResult, ResolveError>;

    /// Re-examine a gated-band selection against the tool's schema.
    ///
    /// Only called when confidence falls in the validation band. The
    /// default accepts — deterministic strategies resolve with definite
    /// confidence and never reach this band.
    async fn validate(
        &self,
        _intent: &str,
        _resolution: &ResolutionResult,
        _catalog: &ToolCatalog,
    ) -> Result<ValidationResult, ResolveError> {
        Ok(ValidationResult::accepted())
    }
}
