//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain types
//! (`AllowList`, `RepoDefaults`) after validation.

use crate::llm::groq;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use switchboard_application::config::{RepoDefaults, ResolverStrategy};
use switchboard_domain::{AllowList, AllowListEntry};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// GitHub API endpoint and repository defaults
    pub github: FileGitHubConfig,
    /// Intent-resolution strategy and model selection
    pub resolver: FileResolverConfig,
    /// Repository/branch/path allow-list
    pub access: FileAccessConfig,
    /// Structured request logging
    pub logging: FileLoggingConfig,
}

/// `[github]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGitHubConfig {
    /// API base URL (override for GitHub Enterprise)
    pub api_base: String,
    pub default_owner: String,
    pub default_repo: String,
    pub default_branch: String,
}

impl Default for FileGitHubConfig {
    fn default() -> Self {
        let defaults = RepoDefaults::default();
        Self {
            api_base: "https://api.github.com".to_string(),
            default_owner: defaults.owner,
            default_repo: defaults.repo,
            default_branch: defaults.branch,
        }
    }
}

/// `[resolver]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResolverConfig {
    /// "llm" or "regex"
    pub strategy: String,
    /// Structured-generation model id
    pub model: String,
    /// Chat-completions API base
    pub api_base: String,
}

impl Default for FileResolverConfig {
    fn default() -> Self {
        Self {
            strategy: "llm".to_string(),
            model: groq::DEFAULT_MODEL.to_string(),
            api_base: groq::DEFAULT_API_BASE.to_string(),
        }
    }
}

/// `[access]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAccessConfig {
    pub repositories: Vec<FileRepositoryRule>,
}

impl Default for FileAccessConfig {
    fn default() -> Self {
        Self {
            repositories: vec![FileRepositoryRule {
                repository: "OpenAgentsInc/snowball".to_string(),
                branches: vec!["main".to_string()],
                paths: vec![
                    "README.md".to_string(),
                    "package.json".to_string(),
                    "docs/".to_string(),
                    "components/".to_string(),
                    "app/".to_string(),
                    "tools/".to_string(),
                ],
            }],
        }
    }
}

/// One `[[access.repositories]]` rule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRepositoryRule {
    /// `owner/repo` key
    pub repository: String,
    pub branches: Vec<String>,
    /// Exact files, or prefixes when ending in `/`
    pub paths: Vec<String>,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL request log path; unset disables the log
    pub request_log: Option<PathBuf>,
}

/// Severity of a configuration issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Warning,
    Error,
}

/// A problem detected during config validation
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: IssueSeverity,
    pub message: String,
}

impl ConfigIssue {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            message: message.into(),
        }
    }
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.resolver.strategy.parse::<ResolverStrategy>().is_err() {
            issues.push(ConfigIssue::warning(format!(
                "resolver.strategy: unknown value '{}', falling back to 'llm'",
                self.resolver.strategy
            )));
        }

        for rule in &self.access.repositories {
            if !rule.repository.contains('/') {
                issues.push(ConfigIssue::warning(format!(
                    "access.repositories: '{}' is not an owner/repo key",
                    rule.repository
                )));
            }
            if rule.branches.is_empty() {
                issues.push(ConfigIssue::warning(format!(
                    "access.repositories: '{}' allows no branches and can never match",
                    rule.repository
                )));
            }
            for path in &rule.paths {
                if path.starts_with('/') {
                    issues.push(ConfigIssue::warning(format!(
                        "access.repositories: path '{}' should be repo-relative (no leading '/')",
                        path
                    )));
                }
            }
        }

        issues
    }

    /// Build the domain allow-list.
    pub fn to_allow_list(&self) -> AllowList {
        self.access
            .repositories
            .iter()
            .fold(AllowList::new(), |list, rule| {
                list.with_entry(
                    rule.repository.clone(),
                    AllowListEntry::new(rule.paths.clone(), rule.branches.clone()),
                )
            })
    }

    /// Default owner/repo/branch for parameter filling.
    pub fn repo_defaults(&self) -> RepoDefaults {
        RepoDefaults::new(
            self.github.default_owner.clone(),
            self.github.default_repo.clone(),
            self.github.default_branch.clone(),
        )
    }

    /// Selected resolution strategy; unknown values fall back to the LLM
    /// strategy (validate() reports the problem).
    pub fn resolver_strategy(&self) -> ResolverStrategy {
        self.resolver.strategy.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_snowball() {
        let config = FileConfig::default();
        let allow_list = config.to_allow_list();

        assert!(allow_list.is_allowed("OpenAgentsInc", "snowball", "README.md", "main"));
        assert!(allow_list.is_allowed("OpenAgentsInc", "snowball", "docs/guide.md", "main"));
        assert!(!allow_list.is_allowed("OpenAgentsInc", "snowball", "secrets.env", "main"));
        assert_eq!(config.repo_defaults().owner, "OpenAgentsInc");
        assert_eq!(config.resolver_strategy(), ResolverStrategy::Llm);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_text = r#"
            [github]
            default_owner = "acme"
            default_repo = "widgets"
            default_branch = "trunk"

            [resolver]
            strategy = "regex"

            [[access.repositories]]
            repository = "acme/widgets"
            branches = ["trunk"]
            paths = ["README.md", "src/"]

            [logging]
            request_log = "/tmp/switchboard.jsonl"
        "#;

        let config: FileConfig = toml::from_str(toml_text).unwrap();

        assert_eq!(config.github.default_owner, "acme");
        assert_eq!(config.resolver_strategy(), ResolverStrategy::Regex);
        assert!(config.to_allow_list().is_allowed("acme", "widgets", "src/lib.rs", "trunk"));
        assert!(config.logging.request_log.is_some());
        // Unconfigured sections keep their defaults
        assert_eq!(config.resolver.model, groq::DEFAULT_MODEL);
    }

    #[test]
    fn test_validate_flags_bad_entries() {
        let config: FileConfig = toml::from_str(
            r#"
            [resolver]
            strategy = "oracle"

            [[access.repositories]]
            repository = "not-a-key"
            branches = []
            paths = ["/absolute.md"]
        "#,
        )
        .unwrap();

        let issues = config.validate();
        let messages: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();

        assert_eq!(issues.len(), 4);
        assert!(messages.iter().any(|m| m.contains("oracle")));
        assert!(messages.iter().any(|m| m.contains("not-a-key")));
        assert!(messages.iter().any(|m| m.contains("no branches")));
        assert!(messages.iter().any(|m| m.contains("/absolute.md")));
        // Unknown strategy still resolves to the default
        assert_eq!(config.resolver_strategy(), ResolverStrategy::Llm);
    }
}
