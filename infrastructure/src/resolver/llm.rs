//! LLM-assisted intent resolver
//!
//! Asks a structured-generation model to pick one tool from the catalog,
//! extract parameters, and score its own confidence conservatively. A
//! second exchange re-validates gated-band selections against the tool's
//! declared schema. The validation pass only gates continuation; it never
//! mutates the already-selected tool.
//!
//! After selection, defaults are applied to unset owner/repo/branch
//! parameters of GitHub-reading tools, and filename normalization runs on
//! the `path` of a file view — but only when the user gave no explicit
//! path form.

use crate::llm::GroqClient;
use async_trait::async_trait;
use serde_json::Value;
use switchboard_application::config::RepoDefaults;
use switchboard_application::ports::intent_resolver::{IntentResolverPort, ResolveError};
use switchboard_domain::{
    Confidence, GithubTool, RequestContext, ResolutionResult, ToolCatalog, ValidationResult,
    normalize_file_path,
};
use tracing::debug;

const SELECTION_SYSTEM_PROMPT: &str = "\
You are a tool selection agent. Given a user's intent and the available \
tools, select the single most appropriate tool and extract its parameters.

Your task:
1. Understand the user's intent
2. Select exactly one tool from the available options
3. Extract only the parameters you can justify from the intent
4. Provide reasoning for your selection
5. Assign a confidence score (0-1)

Be conservative with confidence scores:
- 0.9+ = Almost certain this is the right tool and parameters
- 0.7-0.9 = Fairly confident but there might be some ambiguity
- 0.5-0.7 = Understood the intent but unsure about tool or parameters
- <0.5 = High uncertainty or unable to map the intent to a tool

If the user explicitly states a path, use it exactly as stated. Only \
normalize common filenames (README -> README.md, LICENSE -> LICENSE, \
package.json -> package.json) when no explicit path was given. Always \
include the file extension when specifying a path.

Respond with a single JSON object of the shape \
{\"tool\": string, \"confidence\": number, \"parameters\": object, \
\"reasoning\": string} and nothing else.";

const VALIDATION_SYSTEM_PROMPT: &str = "\
You are a tool validation agent. Verify that a selected tool and its \
parameters match the user's intent and satisfy the tool's schema.

Check:
1. Does the selected tool match the user's intent?
2. Are all required parameters present and sensible?
3. Were explicitly stated paths kept exactly, and common filenames only \
normalized when no explicit path was given?
4. Do file paths carry proper extensions (e.g. README.md, not README)?

If validation fails, suggest how the user could rephrase their request.

Respond with a single JSON object of the shape \
{\"isValid\": boolean, \"missingParameters\": string[], \
\"suggestedPrompt\": string (optional), \"reasoning\": string} and nothing \
else.";

/// Structured-generation resolver with confidence scoring.
pub struct LlmResolver {
    client: GroqClient,
    defaults: RepoDefaults,
}

impl LlmResolver {
    pub fn new(client: GroqClient, defaults: RepoDefaults) -> Self {
        Self { client, defaults }
    }

    fn selection_prompt(&self, intent: &str, catalog: &ToolCatalog) -> String {
        let tools = catalog
            .list()
            .iter()
            .map(|tool| {
                let parameters = tool
                    .parameters
                    .iter()
                    .map(|p| {
                        format!(
                            "{}: {} ({})",
                            p.name,
                            p.description,
                            if p.required { "required" } else { "optional" }
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("- {}: {}\n  Parameters: {}", tool.name, tool.description, parameters)
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Available tools:\n{tools}\n\n\
             User intent: \"{intent}\"\n\n\
             Select the most appropriate tool and extract parameters from the intent.\n\n\
             For GitHub operations, if owner/repo/branch are not specified:\n\
             - Default owner: {owner}\n\
             - Default repo: {repo}\n\
             - Default branch: {branch}",
            tools = tools,
            intent = intent,
            owner = self.defaults.owner,
            repo = self.defaults.repo,
            branch = self.defaults.branch,
        )
    }

    fn validation_prompt(
        &self,
        intent: &str,
        resolution: &ResolutionResult,
        catalog: &ToolCatalog,
    ) -> String {
        let definition = catalog
            .find(&resolution.tool)
            .and_then(|tool| serde_json::to_string_pretty(tool).ok())
            .unwrap_or_else(|| "(unknown tool)".to_string());
        let parameters = serde_json::to_string_pretty(&resolution.parameters)
            .unwrap_or_else(|_| "{}".to_string());

        format!(
            "User intent: \"{intent}\"\n\n\
             Selected tool: {tool}\n\
             Tool definition: {definition}\n\
             Extracted parameters: {parameters}\n\n\
             Acceptable defaults for unspecified values: owner {owner}, \
             repo {repo}, branch {branch}.\n\n\
             Validate this tool selection and parameter extraction.",
            intent = intent,
            tool = resolution.tool,
            definition = definition,
            parameters = parameters,
            owner = self.defaults.owner,
            repo = self.defaults.repo,
            branch = self.defaults.branch,
        )
    }

    /// Fill unset owner/repo/branch and normalize a file view's path.
    /// Runs only for GitHub-reading tools; explicit values are kept.
    fn apply_defaults(&self, resolution: &mut ResolutionResult, intent: &str) {
        let Some(tool) = GithubTool::from_name(&resolution.tool) else {
            return;
        };

        for (key, default) in self.defaults.pairs() {
            resolution
                .parameters
                .entry(key.to_string())
                .or_insert_with(|| Value::String(default.to_string()));
        }

        if tool.is_file_view() {
            let path = resolution.get_string("path").map(str::to_string);
            if let Some(path) = path {
                let normalized = normalize_file_path(&path, Some(intent));
                if normalized != path {
                    debug!(from = %path, to = %normalized, "Normalized resolved path");
                    resolution
                        .parameters
                        .insert("path".to_string(), Value::String(normalized));
                }
            }
        }
    }
}

fn parse_selection(value: Value) -> Result<ResolutionResult, ResolveError> {
    let tool = value
        .get("tool")
        .and_then(Value::as_str)
        .ok_or_else(|| ResolveError::Generation("selection is missing 'tool'".to_string()))?
        .to_string();
    let confidence = value
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| ResolveError::Generation("selection is missing 'confidence'".to_string()))?;
    let parameters = value
        .get("parameters")
        .and_then(Value::as_object)
        .map(|map| map.clone().into_iter().collect())
        .unwrap_or_default();
    let reasoning = value
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    Ok(ResolutionResult {
        tool,
        confidence: Confidence::new(confidence),
        parameters,
        reasoning,
    })
}

fn parse_validation(value: Value) -> Result<ValidationResult, ResolveError> {
    let is_valid = value
        .get("isValid")
        .and_then(Value::as_bool)
        .ok_or_else(|| ResolveError::Generation("validation is missing 'isValid'".to_string()))?;
    let missing_parameters = value
        .get("missingParameters")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    let suggested_prompt = value
        .get("suggestedPrompt")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let reasoning = value
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    Ok(ValidationResult {
        is_valid,
        missing_parameters,
        suggested_prompt,
        reasoning,
    })
}

#[async_trait]
impl IntentResolverPort for LlmResolver {
    async fn resolve(
        &self,
        intent: &str,
        _context: &RequestContext,
        catalog: &ToolCatalog,
    ) -> Result<ResolutionResult, ResolveError> {
        let prompt = self.selection_prompt(intent, catalog);
        let object = self
            .client
            .generate_object(SELECTION_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| ResolveError::Generation(e.to_string()))?;

        let mut resolution = parse_selection(object)?;
        debug!(
            tool = %resolution.tool,
            confidence = %resolution.confidence,
            "Model selected tool"
        );

        self.apply_defaults(&mut resolution, intent);
        Ok(resolution)
    }

    async fn validate(
        &self,
        intent: &str,
        resolution: &ResolutionResult,
        catalog: &ToolCatalog,
    ) -> Result<ValidationResult, ResolveError> {
        let prompt = self.validation_prompt(intent, resolution, catalog);
        let object = self
            .client
            .generate_object(VALIDATION_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| ResolveError::Generation(e.to_string()))?;

        parse_validation(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    fn resolver_for(server: &MockServer) -> LlmResolver {
        LlmResolver::new(
            GroqClient::new("test-key".to_string(), None, Some(server.base_url())),
            RepoDefaults::default(),
        )
    }

    fn chat_reply(content: &Value) -> Value {
        json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": content.to_string()
                }
            }]
        })
    }

    #[test]
    fn test_parse_selection() {
        let resolution = parse_selection(json!({
            "tool": "view_file",
            "confidence": 0.85,
            "parameters": {"path": "README.md"},
            "reasoning": "user wants the readme"
        }))
        .unwrap();

        assert_eq!(resolution.tool, "view_file");
        assert_eq!(resolution.confidence.value(), 0.85);
        assert_eq!(resolution.get_string("path"), Some("README.md"));
        assert_eq!(resolution.reasoning, "user wants the readme");
    }

    #[test]
    fn test_parse_selection_requires_tool_and_confidence() {
        assert!(parse_selection(json!({"confidence": 0.9})).is_err());
        assert!(parse_selection(json!({"tool": "view_file"})).is_err());
    }

    #[test]
    fn test_parse_selection_clamps_confidence() {
        let resolution = parse_selection(json!({
            "tool": "view_file",
            "confidence": 1.7,
            "parameters": {},
            "reasoning": ""
        }))
        .unwrap();
        assert_eq!(resolution.confidence.value(), 1.0);
    }

    #[test]
    fn test_parse_validation() {
        let verdict = parse_validation(json!({
            "isValid": false,
            "missingParameters": ["path"],
            "suggestedPrompt": "Name the file you want to read",
            "reasoning": "no file identified"
        }))
        .unwrap();

        assert!(!verdict.is_valid);
        assert_eq!(verdict.missing_parameters, vec!["path"]);
        assert_eq!(
            verdict.suggested_prompt.as_deref(),
            Some("Name the file you want to read")
        );
    }

    #[test]
    fn test_selection_prompt_lists_tools_and_defaults() {
        let server = MockServer::start();
        let resolver = resolver_for(&server);
        let prompt = resolver.selection_prompt("show the readme", &ToolCatalog::builtin());

        assert!(prompt.contains("view_file"));
        assert!(prompt.contains("view_folder"));
        assert!(prompt.contains("Default owner: OpenAgentsInc"));
        assert!(prompt.contains("show the readme"));
    }

    #[tokio::test]
    async fn test_resolve_applies_defaults_and_normalization() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(chat_reply(&json!({
                "tool": "view_file",
                "confidence": 0.92,
                "parameters": {"path": "readme"},
                "reasoning": "user asked for the readme"
            })));
        });

        let resolution = resolver_for(&server)
            .resolve(
                "show me the readme",
                &RequestContext::default(),
                &ToolCatalog::builtin(),
            )
            .await
            .unwrap();

        assert_eq!(resolution.get_string("path"), Some("README.md"));
        assert_eq!(resolution.get_string("owner"), Some("OpenAgentsInc"));
        assert_eq!(resolution.get_string("repo"), Some("snowball"));
        assert_eq!(resolution.get_string("branch"), Some("main"));
    }

    #[tokio::test]
    async fn test_resolve_keeps_explicit_parameters() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(chat_reply(&json!({
                "tool": "view_file",
                "confidence": 0.95,
                "parameters": {"path": "docs/intro.md", "owner": "acme"},
                "reasoning": "explicit path given"
            })));
        });

        let resolution = resolver_for(&server)
            .resolve(
                "read docs/intro.md from acme",
                &RequestContext::default(),
                &ToolCatalog::builtin(),
            )
            .await
            .unwrap();

        // Explicit path untouched, explicit owner kept, gaps filled
        assert_eq!(resolution.get_string("path"), Some("docs/intro.md"));
        assert_eq!(resolution.get_string("owner"), Some("acme"));
        assert_eq!(resolution.get_string("repo"), Some("snowball"));
    }

    #[tokio::test]
    async fn test_resolve_skips_defaults_for_unknown_tools() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(chat_reply(&json!({
                "tool": "create_file",
                "confidence": 0.4,
                "parameters": {},
                "reasoning": "hallucinated a write tool"
            })));
        });

        let resolution = resolver_for(&server)
            .resolve(
                "make a new file",
                &RequestContext::default(),
                &ToolCatalog::builtin(),
            )
            .await
            .unwrap();

        // Not a GitHub-reading tool: no defaults are injected
        assert!(resolution.parameters.is_empty());
    }

    #[tokio::test]
    async fn test_validate_round_trip() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("view_file")
                .body_contains("Validate this tool selection");
            then.status(200).json_body(chat_reply(&json!({
                "isValid": true,
                "missingParameters": [],
                "reasoning": "selection is consistent"
            })));
        });

        let resolution = ResolutionResult::new("view_file", Confidence::new(0.6))
            .with_parameter("path", "README.md");
        let verdict = resolver_for(&server)
            .validate("show the readme", &resolution, &ToolCatalog::builtin())
            .await
            .unwrap();

        mock.assert();
        assert!(verdict.is_valid);
        assert!(verdict.missing_parameters.is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces_as_resolve_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).body("overloaded");
        });

        let err = resolver_for(&server)
            .resolve(
                "show the readme",
                &RequestContext::default(),
                &ToolCatalog::builtin(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Generation(_)));
    }
}
