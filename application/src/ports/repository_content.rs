//! Repository Content port
//!
//! Defines the interface for fetching file and folder contents from the
//! upstream repository host. The caller is responsible for authorization;
//! implementations do not re-check the allow-list (layering contract).

use async_trait::async_trait;
use switchboard_domain::{ContentLocation, DispatchError, FolderEntry};
use thiserror::Error;

/// Errors that can occur during a content fetch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    /// Upstream rejected the credentials (401/403), or no token is
    /// configured.
    #[error("GitHub authentication failed")]
    AuthenticationFailed,

    /// Upstream reported the path missing (404).
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Any other non-success upstream status.
    #[error("GitHub API error: {status} {status_text}")]
    Upstream { status: u16, status_text: String },

    /// The request never produced an upstream status (DNS failure,
    /// connection refused, body read error).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<ContentError> for DispatchError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::AuthenticationFailed => DispatchError::AuthenticationFailed,
            ContentError::NotFound { path } => DispatchError::NotFound { path },
            ContentError::Upstream {
                status,
                status_text,
            } => DispatchError::Upstream {
                status,
                status_text,
            },
            ContentError::Transport(message) => DispatchError::Internal { message },
        }
    }
}

/// Port for reading repository content
#[async_trait]
pub trait RepositoryContentPort: Send + Sync {
    /// Fetch raw file text.
    async fn view_file(&self, location: &ContentLocation) -> Result<String, ContentError>;

    /// Fetch a folder listing, preserving upstream ordering.
    async fn view_folder(
        &self,
        location: &ContentLocation,
    ) -> Result<Vec<FolderEntry>, ContentError>;
}
