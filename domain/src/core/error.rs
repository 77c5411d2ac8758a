//! Dispatch error taxonomy
//!
//! Every failure class a request can hit maps to exactly one
//! [`DispatchError`] variant, and every variant maps to one HTTP status.
//! The `Display` text of each variant is the user-facing message: it never
//! contains the access token, allow-list contents, or upstream internals.

use thiserror::Error;

/// Terminal outcome classification for a failed dispatch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// Request carried no intent text.
    #[error("No intent provided")]
    MissingIntent,

    /// No pattern or registered tool matched the request.
    #[error("{message}")]
    UnrecognizedIntent { message: String },

    /// A required value was still absent after extraction. The message is
    /// shown to the user verbatim ("Please specify which file..."), and
    /// `missing` carries the parameter names when they are known.
    #[error("{message}")]
    MissingParameter {
        message: String,
        missing: Vec<String>,
    },

    /// Resolver confidence fell below the low threshold.
    #[error("I wasn't confident enough about that request: {reasoning}")]
    LowConfidence { reasoning: String },

    /// The second-pass validation rejected a gated-band selection.
    #[error("{reasoning}")]
    ValidationFailed {
        reasoning: String,
        suggested_prompt: Option<String>,
        missing_parameters: Vec<String>,
    },

    /// The path/branch/repository is not on the allow-list. The message is
    /// deliberately generic.
    #[error("This file or folder is not publicly accessible")]
    Unauthorized,

    /// Upstream returned 404 for the requested path.
    #[error("File or folder not found: {path}")]
    NotFound { path: String },

    /// Upstream rejected our credentials (401/403) or no token is
    /// configured. The real cause is logged, never surfaced.
    #[error("Sorry, I cannot access GitHub right now. Please try again later.")]
    AuthenticationFailed,

    /// Any other non-success upstream status.
    #[error("GitHub API error: {status} {status_text}")]
    Upstream { status: u16, status_text: String },

    /// Unexpected failure anywhere in the pipeline.
    #[error("Internal server error")]
    Internal { message: String },
}

impl DispatchError {
    /// HTTP status code for this failure class.
    pub fn http_status(&self) -> u16 {
        match self {
            DispatchError::MissingIntent
            | DispatchError::UnrecognizedIntent { .. }
            | DispatchError::MissingParameter { .. }
            | DispatchError::LowConfidence { .. }
            | DispatchError::ValidationFailed { .. } => 400,
            DispatchError::Unauthorized => 403,
            DispatchError::NotFound { .. } => 404,
            DispatchError::AuthenticationFailed => 503,
            DispatchError::Upstream { .. } | DispatchError::Internal { .. } => 500,
        }
    }

    /// Missing-parameter names to include in the response, if any.
    pub fn missing_parameters(&self) -> Option<&[String]> {
        match self {
            DispatchError::MissingParameter { missing, .. } if !missing.is_empty() => {
                Some(missing)
            }
            DispatchError::ValidationFailed {
                missing_parameters, ..
            } if !missing_parameters.is_empty() => Some(missing_parameters),
            _ => None,
        }
    }

    /// Classify an error that escaped every stage-local handler.
    ///
    /// Mirrors the top-level catch: anything whose message mentions
    /// authentication becomes [`DispatchError::AuthenticationFailed`],
    /// everything else is a generic internal error.
    pub fn classify_unexpected(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.to_lowercase().contains("authentication") {
            DispatchError::AuthenticationFailed
        } else {
            DispatchError::Internal { message }
        }
    }
}
