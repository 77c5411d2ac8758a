//! Application configuration types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default owner/repo/branch applied when a resolution leaves them unset.
///
/// Defaults only ever fill absent parameters; an explicit value from the
/// request or the resolver is never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoDefaults {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl Default for RepoDefaults {
    fn default() -> Self {
        Self {
            owner: "OpenAgentsInc".to_string(),
            repo: "snowball".to_string(),
            branch: "main".to_string(),
        }
    }
}

impl RepoDefaults {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// Parameter name → default value pairs, in schema order.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("owner", self.owner.as_str()),
            ("repo", self.repo.as_str()),
            ("branch", self.branch.as_str()),
        ]
    }
}

/// Which intent-resolution strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverStrategy {
    /// Deterministic first-match-wins pattern dispatch.
    Regex,
    /// Structured-generation selection with confidence gating.
    #[default]
    Llm,
}

impl FromStr for ResolverStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regex" | "pattern" => Ok(ResolverStrategy::Regex),
            "llm" => Ok(ResolverStrategy::Llm),
            other => Err(format!("unknown resolver strategy: {}", other)),
        }
    }
}

impl std::fmt::Display for ResolverStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolverStrategy::Regex => write!(f, "regex"),
            ResolverStrategy::Llm => write!(f, "llm"),
        }
    }
}
