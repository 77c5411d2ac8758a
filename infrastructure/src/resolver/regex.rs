//! Deterministic pattern-based intent resolver
//!
//! Maintains an ordered list of (pattern, tool) pairs and takes the first
//! match — first-match-wins, not best-match. The file pattern is tested
//! before the folder pattern, so folder phrasing that also contains a file
//! verb ("view ...") resolves as a file view; this overlap is long-standing
//! observed behavior and is kept as-is.
//!
//! No confidence is computed: a match is definite and always proceeds.

use async_trait::async_trait;
use regex::Regex;
use switchboard_application::config::RepoDefaults;
use switchboard_application::ports::intent_resolver::{IntentResolverPort, ResolveError};
use switchboard_domain::{
    Confidence, GithubTool, RequestContext, ResolutionResult, ToolCatalog,
};
use tracing::debug;

/// First-match-wins regex dispatch over the GitHub-reading tools.
pub struct RegexResolver {
    intents: Vec<(Regex, GithubTool)>,
    file_paths: Vec<Regex>,
    folder_paths: Vec<Regex>,
    defaults: RepoDefaults,
}

impl RegexResolver {
    pub fn new(defaults: RepoDefaults) -> Self {
        let intents = vec![
            (
                Regex::new(r"(?i)read|view|show|get|fetch|what'?s?\s+in|contents?\s+of")
                    .expect("valid file intent pattern"),
                GithubTool::ViewFile,
            ),
            (
                Regex::new(
                    r"(?i)(?:list|show|view|get)\s+(?:folder|directory|dir)|what'?s?\s+in\s+(?:folder|directory|dir)",
                )
                .expect("valid folder intent pattern"),
                GithubTool::ViewFolder,
            ),
        ];

        let file_paths = vec![
            Regex::new(r"(?i)(?:read|view|show|get|fetch)\s+(?:the\s+)?(\S+(?:\.\w+)?)")
                .expect("valid file path pattern"),
            Regex::new(r"(?i)what'?s?\s+in\s+(?:the\s+)?(\S+(?:\.\w+)?)")
                .expect("valid file path pattern"),
            Regex::new(r"(?i)contents?\s+of\s+(?:the\s+)?(\S+(?:\.\w+)?)")
                .expect("valid file path pattern"),
        ];

        let folder_paths = vec![
            Regex::new(
                r"(?i)(?:list|show|view|get)\s+(?:the\s+)?(?:contents?\s+of\s+)?(?:folder|directory|dir)?\s*(\S+)",
            )
            .expect("valid folder path pattern"),
            Regex::new(r"(?i)what'?s?\s+in\s+(?:the\s+)?(?:folder|directory|dir)?\s*(\S+)")
                .expect("valid folder path pattern"),
        ];

        Self {
            intents,
            file_paths,
            folder_paths,
            defaults,
        }
    }

    fn extract_file_path(&self, intent: &str) -> Option<String> {
        // Common-file shortcuts win over the generic patterns
        let lower = intent.to_lowercase();
        if lower.contains("readme") {
            return Some("README.md".to_string());
        }
        if lower.contains("package.json") {
            return Some("package.json".to_string());
        }

        self.first_capture(&self.file_paths, intent)
    }

    fn extract_folder_path(&self, intent: &str) -> Option<String> {
        self.first_capture(&self.folder_paths, intent)
    }

    fn first_capture(&self, patterns: &[Regex], intent: &str) -> Option<String> {
        patterns.iter().find_map(|pattern| {
            pattern
                .captures(intent)
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().to_string())
        })
    }

    fn extract(
        &self,
        tool: GithubTool,
        intent: &str,
        context: &RequestContext,
    ) -> Result<ResolutionResult, ResolveError> {
        // An explicit context path always wins over intent extraction
        let path = match tool {
            GithubTool::ViewFile => context
                .file_path()
                .map(str::to_string)
                .or_else(|| self.extract_file_path(intent)),
            GithubTool::ViewFolder => context
                .folder_path()
                .map(str::to_string)
                .or_else(|| self.extract_folder_path(intent)),
        };

        let Some(path) = path else {
            let message = match tool {
                GithubTool::ViewFile => "Please specify which file you want to read",
                GithubTool::ViewFolder => "Please specify which folder you want to view",
            };
            return Err(ResolveError::MissingParameter(message.to_string()));
        };

        let owner = context.owner().unwrap_or(&self.defaults.owner);
        let repo = context.repo().unwrap_or(&self.defaults.repo);
        let branch = context.branch().unwrap_or(&self.defaults.branch);

        Ok(ResolutionResult::new(tool.name(), Confidence::definite())
            .with_parameter("path", path)
            .with_parameter("owner", owner)
            .with_parameter("repo", repo)
            .with_parameter("branch", branch)
            .with_reasoning(format!("Matched deterministic pattern for {}", tool)))
    }
}

#[async_trait]
impl IntentResolverPort for RegexResolver {
    async fn resolve(
        &self,
        intent: &str,
        context: &RequestContext,
        _catalog: &ToolCatalog,
    ) -> Result<ResolutionResult, ResolveError> {
        for (pattern, tool) in &self.intents {
            if pattern.is_match(intent) {
                debug!(tool = %tool, "Intent matched deterministic pattern");
                return self.extract(*tool, intent, context);
            }
        }

        Err(ResolveError::UnrecognizedIntent)
    }
}
