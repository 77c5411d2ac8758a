//! Path allow-list authorization
//!
//! Static configuration restricting which repository / branch / path
//! combinations may be read. Checked before every content fetch and never
//! memoized, so a configuration reload takes effect without cache
//! invalidation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Allowed paths and branches for a single `owner/repo`.
///
/// Path entries ending in `/` are literal prefixes; all others require an
/// exact match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowListEntry {
    pub paths: Vec<String>,
    pub branches: Vec<String>,
}

impl AllowListEntry {
    pub fn new(
        paths: impl IntoIterator<Item = impl Into<String>>,
        branches: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            branches: branches.into_iter().map(Into::into).collect(),
        }
    }

    fn allows_path(&self, path: &str) -> bool {
        self.paths.iter().any(|allowed| {
            if allowed.ends_with('/') {
                path.starts_with(allowed.as_str())
            } else {
                path == allowed
            }
        })
    }
}

/// Why an access check failed.
///
/// The detail is for internal diagnostics only; callers surface a generic
/// denial to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDenial {
    EmptyPath,
    UnknownRepository { repo_key: String },
    BranchNotAllowed { branch: String },
    PathNotAllowed { path: String },
}

impl std::fmt::Display for AccessDenial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessDenial::EmptyPath => write!(f, "no path provided"),
            AccessDenial::UnknownRepository { repo_key } => {
                write!(f, "repository not on allow-list: {}", repo_key)
            }
            AccessDenial::BranchNotAllowed { branch } => {
                write!(f, "branch not allowed: {}", branch)
            }
            AccessDenial::PathNotAllowed { path } => {
                write!(f, "path not allowed: {}", path)
            }
        }
    }
}

/// Static allow-list keyed by `owner/repo`.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    entries: HashMap<String, AllowListEntry>,
}

impl AllowList {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register an entry under an `owner/repo` key (builder pattern).
    pub fn with_entry(mut self, repo_key: impl Into<String>, entry: AllowListEntry) -> Self {
        self.entries.insert(repo_key.into(), entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check admissibility, reporting the denial reason on rejection.
    pub fn check(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<(), AccessDenial> {
        if path.is_empty() {
            return Err(AccessDenial::EmptyPath);
        }

        let repo_key = format!("{}/{}", owner, repo);
        let entry = self
            .entries
            .get(&repo_key)
            .ok_or(AccessDenial::UnknownRepository {
                repo_key: repo_key.clone(),
            })?;

        if !entry.branches.iter().any(|b| b == branch) {
            return Err(AccessDenial::BranchNotAllowed {
                branch: branch.to_string(),
            });
        }

        if !entry.allows_path(path) {
            return Err(AccessDenial::PathNotAllowed {
                path: path.to_string(),
            });
        }

        Ok(())
    }

    /// Boolean form of [`check`](Self::check).
    pub fn is_allowed(&self, owner: &str, repo: &str, path: &str, branch: &str) -> bool {
        self.check(owner, repo, path, branch).is_ok()
    }
}
