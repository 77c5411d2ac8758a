//! GitHub contents API client
//!
//! Fetches raw file text and folder listings through
//! `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}`, selecting the
//! representation via the `Accept` header. Upstream failures are mapped to
//! typed [`ContentError`]s; the real cause of authentication problems is
//! logged here and never carried in the error the caller surfaces.
//!
//! This client assumes the allow-list check already happened upstream — it
//! performs no authorization of its own (layering contract).

use async_trait::async_trait;
use reqwest::header;
use switchboard_application::ports::repository_content::{ContentError, RepositoryContentPort};
use switchboard_domain::{ContentLocation, FolderEntry};
use tracing::{debug, error, warn};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const ACCEPT_RAW: &str = "application/vnd.github.v3.raw";
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("switchboard/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for the GitHub contents API.
///
/// A missing token is a configuration problem reported at readiness time;
/// requests made anyway fail with [`ContentError::AuthenticationFailed`]
/// rather than panicking.
pub struct GitHubContentClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubContentClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE.to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Override the API base URL (tests, GitHub Enterprise).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether an access token is configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    async fn fetch_contents(
        &self,
        location: &ContentLocation,
        accept: &'static str,
    ) -> Result<reqwest::Response, ContentError> {
        let Some(token) = self.token.as_deref() else {
            error!("GitHub token is not configured; refusing content fetch");
            return Err(ContentError::AuthenticationFailed);
        };

        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url.trim_end_matches('/'),
            location.owner,
            location.repo,
            location.path,
        );

        debug!(%location, "GitHub contents request");

        let response = self
            .http
            .get(&url)
            .query(&[("ref", location.branch.as_str())])
            .header(header::ACCEPT, accept)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            warn!(status = status.as_u16(), %location, "GitHub rejected credentials");
            return Err(ContentError::AuthenticationFailed);
        }

        if status.as_u16() == 404 {
            return Err(ContentError::NotFound {
                path: location.path.clone(),
            });
        }

        if !status.is_success() {
            return Err(ContentError::Upstream {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl RepositoryContentPort for GitHubContentClient {
    async fn view_file(&self, location: &ContentLocation) -> Result<String, ContentError> {
        let response = self.fetch_contents(location, ACCEPT_RAW).await?;
        response
            .text()
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))
    }

    async fn view_folder(
        &self,
        location: &ContentLocation,
    ) -> Result<Vec<FolderEntry>, ContentError> {
        let response = self.fetch_contents(location, ACCEPT_JSON).await?;
        // Upstream ordering is preserved; extra fields are dropped at
        // deserialization
        response
            .json::<Vec<FolderEntry>>()
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))
    }
}
