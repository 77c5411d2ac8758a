//! Dispatch use case.
//!
//! Orchestrates a single request through the pipeline:
//! resolve intent → confidence gate → normalize parameters → authorize
//! path → fetch content → respond. Every stage failure is terminal and
//! produces exactly one response; nothing is retried.
//!
//! Two request shapes are accepted: a free-text intent (resolver-driven)
//! and a direct tool invocation validated against the catalog schema.

use crate::config::RepoDefaults;
use crate::ports::intent_resolver::{IntentResolverPort, ResolveError};
use crate::ports::repository_content::RepositoryContentPort;
use crate::ports::request_logger::{NoRequestLogger, RequestEvent, RequestLogger};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use switchboard_domain::{
    AllowList, ConfidenceBand, Content, ContentLocation, DefaultToolCallValidator, DispatchError,
    GithubTool, RequestContext, ToolCall, ToolCallValidator, ToolCatalog, normalize_file_path,
};
use tracing::{debug, info, warn};

/// An inbound dispatch request.
///
/// Either a natural-language intent with optional context hints, or a
/// direct tool invocation with explicit parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DispatchRequest {
    Direct {
        tool: String,
        #[serde(default)]
        parameters: HashMap<String, serde_json::Value>,
    },
    Intent {
        intent: String,
        #[serde(default)]
        context: RequestContext,
    },
}

impl DispatchRequest {
    pub fn intent(intent: impl Into<String>) -> Self {
        DispatchRequest::Intent {
            intent: intent.into(),
            context: RequestContext::default(),
        }
    }

    pub fn intent_with_context(intent: impl Into<String>, context: RequestContext) -> Self {
        DispatchRequest::Intent {
            intent: intent.into(),
            context,
        }
    }

    pub fn tool(
        tool: impl Into<String>,
        parameters: HashMap<String, serde_json::Value>,
    ) -> Self {
        DispatchRequest::Direct {
            tool: tool.into(),
            parameters,
        }
    }
}

/// Wire body of a dispatch response.
///
/// Serializes untagged: `{"result": ...}` on success,
/// `{"error": ..., "missingParameters": [...]}` on failure.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ResponseBody {
    Success {
        result: Content,
    },
    Error {
        error: String,
        #[serde(rename = "missingParameters", skip_serializing_if = "Option::is_none")]
        missing_parameters: Option<Vec<String>>,
    },
}

/// A terminal dispatch outcome: HTTP status plus response body.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl DispatchResponse {
    pub fn ok(content: Content) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Success { result: content },
        }
    }

    pub fn from_error(error: &DispatchError) -> Self {
        Self {
            status: error.http_status(),
            body: ResponseBody::Error {
                error: error.to_string(),
                missing_parameters: error.missing_parameters().map(<[String]>::to_vec),
            },
        }
    }

    /// Top-level catch for errors that escaped every stage, classified by
    /// message content into authentication-vs-generic.
    pub fn from_unexpected(message: impl Into<String>) -> Self {
        Self::from_error(&DispatchError::classify_unexpected(message))
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Use case for dispatching a request onto the GitHub-reading tools.
pub struct DispatchUseCase {
    resolver: Arc<dyn IntentResolverPort>,
    content: Arc<dyn RepositoryContentPort>,
    catalog: ToolCatalog,
    allow_list: AllowList,
    defaults: RepoDefaults,
    validator: DefaultToolCallValidator,
    request_logger: Arc<dyn RequestLogger>,
}

impl DispatchUseCase {
    pub fn new(
        resolver: Arc<dyn IntentResolverPort>,
        content: Arc<dyn RepositoryContentPort>,
        catalog: ToolCatalog,
        allow_list: AllowList,
        defaults: RepoDefaults,
    ) -> Self {
        Self {
            resolver,
            content,
            catalog,
            allow_list,
            defaults,
            validator: DefaultToolCallValidator,
            request_logger: Arc::new(NoRequestLogger),
        }
    }

    /// Attach a structured request logger.
    pub fn with_request_logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.request_logger = logger;
        self
    }

    /// Handle one request to a terminal response.
    pub async fn execute(&self, request: DispatchRequest) -> DispatchResponse {
        match &request {
            DispatchRequest::Intent { intent, .. } => {
                self.request_logger.log(RequestEvent::new(
                    "dispatch_request",
                    serde_json::json!({ "kind": "intent", "intent": intent }),
                ));
            }
            DispatchRequest::Direct { tool, parameters } => {
                self.request_logger.log(RequestEvent::new(
                    "dispatch_request",
                    serde_json::json!({ "kind": "tool", "tool": tool, "parameters": parameters }),
                ));
            }
        }

        let outcome = match request {
            DispatchRequest::Intent { intent, context } => {
                self.dispatch_intent(&intent, &context).await
            }
            DispatchRequest::Direct { tool, parameters } => {
                self.dispatch_tool(&tool, parameters).await
            }
        };

        let response = match outcome {
            Ok(content) => DispatchResponse::ok(content),
            Err(error) => {
                info!(status = error.http_status(), %error, "Dispatch failed");
                DispatchResponse::from_error(&error)
            }
        };

        self.request_logger.log(RequestEvent::new(
            "dispatch_response",
            serde_json::json!({ "status": response.status, "success": response.is_success() }),
        ));

        response
    }

    async fn dispatch_intent(
        &self,
        intent: &str,
        context: &RequestContext,
    ) -> Result<Content, DispatchError> {
        if intent.trim().is_empty() {
            return Err(DispatchError::MissingIntent);
        }

        info!("Dispatching intent");

        let resolution = self
            .resolver
            .resolve(intent, context, &self.catalog)
            .await
            .map_err(map_resolve_error)?;

        debug!(
            tool = %resolution.tool,
            confidence = %resolution.confidence,
            "Intent resolved"
        );
        self.request_logger.log(RequestEvent::new(
            "tool_resolved",
            serde_json::json!({
                "tool": resolution.tool,
                "confidence": resolution.confidence.value(),
                "reasoning": resolution.reasoning,
            }),
        ));

        match resolution.confidence.band() {
            ConfidenceBand::Reject => {
                info!(confidence = %resolution.confidence, "Rejecting low-confidence resolution");
                return Err(DispatchError::LowConfidence {
                    reasoning: resolution.reasoning,
                });
            }
            ConfidenceBand::Validate => {
                // Side call: gates continuation, never mutates the selection
                let verdict = self
                    .resolver
                    .validate(intent, &resolution, &self.catalog)
                    .await
                    .map_err(map_resolve_error)?;
                if !verdict.is_valid {
                    info!("Validation pass rejected gated resolution");
                    return Err(DispatchError::ValidationFailed {
                        reasoning: verdict.reasoning,
                        suggested_prompt: verdict.suggested_prompt,
                        missing_parameters: verdict.missing_parameters,
                    });
                }
            }
            ConfidenceBand::Proceed => {}
        }

        let tool = GithubTool::from_name(&resolution.tool).ok_or_else(|| {
            DispatchError::UnrecognizedIntent {
                message: format!("Tool '{}' is not available", resolution.tool),
            }
        })?;

        let mut call = resolution.into_call();
        self.normalize_call(tool, &mut call, intent);
        self.execute_call(tool, &call).await
    }

    async fn dispatch_tool(
        &self,
        tool_name: &str,
        parameters: HashMap<String, serde_json::Value>,
    ) -> Result<Content, DispatchError> {
        let definition =
            self.catalog
                .find(tool_name)
                .ok_or_else(|| DispatchError::UnrecognizedIntent {
                    message: format!("Tool '{}' is not available", tool_name),
                })?;

        let call = ToolCall {
            tool_name: tool_name.to_string(),
            arguments: parameters,
            reasoning: None,
        };

        let missing = self.validator.missing_parameters(&call, definition);
        if !missing.is_empty() {
            return Err(DispatchError::MissingParameter {
                message: format!("Missing required parameters: {}", missing.join(", ")),
                missing,
            });
        }

        let tool = GithubTool::from_name(tool_name).ok_or_else(|| {
            DispatchError::UnrecognizedIntent {
                message: format!("Tool '{}' is not available", tool_name),
            }
        })?;

        self.execute_call(tool, &call).await
    }

    /// Fill absent owner/repo/branch defaults, then normalize the path of a
    /// file view. Explicit values are never overwritten.
    fn normalize_call(&self, tool: GithubTool, call: &mut ToolCall, intent: &str) {
        for (key, default) in self.defaults.pairs() {
            call.arguments
                .entry(key.to_string())
                .or_insert_with(|| serde_json::Value::String(default.to_string()));
        }

        if tool.is_file_view() {
            let normalized = call
                .get_string("path")
                .map(|p| (p.to_string(), normalize_file_path(p, Some(intent))));
            if let Some((original, normalized)) = normalized
                && normalized != original
            {
                debug!(from = %original, to = %normalized, "Normalized file path");
                call.arguments
                    .insert("path".to_string(), serde_json::Value::String(normalized));
            }
        }
    }

    /// Authorize against the allow-list, then fetch. Authorization is
    /// re-checked on every request; the content port does not re-check.
    async fn execute_call(
        &self,
        tool: GithubTool,
        call: &ToolCall,
    ) -> Result<Content, DispatchError> {
        let location = self.location_from(tool, call)?;

        if let Err(denial) = self.allow_list.check(
            &location.owner,
            &location.repo,
            &location.path,
            &location.branch,
        ) {
            warn!(%denial, %location, "Blocked repository access");
            return Err(DispatchError::Unauthorized);
        }

        debug!(%location, tool = %tool, "Fetching repository content");

        match tool {
            GithubTool::ViewFile => {
                let text = self.content.view_file(&location).await?;
                Ok(Content::File(text))
            }
            GithubTool::ViewFolder => {
                let entries = self.content.view_folder(&location).await?;
                Ok(Content::Folder(entries))
            }
        }
    }

    fn location_from(
        &self,
        tool: GithubTool,
        call: &ToolCall,
    ) -> Result<ContentLocation, DispatchError> {
        let require = |key: &str, message: &str| {
            call.get_string(key)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| DispatchError::MissingParameter {
                    message: message.to_string(),
                    missing: vec![key.to_string()],
                })
        };

        let path_message = match tool {
            GithubTool::ViewFile => "Please specify which file you want to read",
            GithubTool::ViewFolder => "Please specify which folder you want to view",
        };

        Ok(ContentLocation {
            path: require("path", path_message)?,
            owner: require("owner", "Missing required argument: owner")?,
            repo: require("repo", "Missing required argument: repo")?,
            branch: require("branch", "Missing required argument: branch")?,
        })
    }
}

fn map_resolve_error(err: ResolveError) -> DispatchError {
    match err {
        ResolveError::UnrecognizedIntent => DispatchError::UnrecognizedIntent {
            message: err.to_string(),
        },
        ResolveError::MissingParameter(message) => DispatchError::MissingParameter {
            message,
            missing: Vec::new(),
        },
        ResolveError::Generation(message) => DispatchError::Internal { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::repository_content::ContentError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use switchboard_domain::{
        AllowListEntry, Confidence, EntryKind, FolderEntry, ResolutionResult, ValidationResult,
    };

    // ==================== Test Mocks ====================

    struct MockResolver {
        resolutions: Mutex<VecDeque<Result<ResolutionResult, ResolveError>>>,
        validations: Mutex<VecDeque<ValidationResult>>,
        validate_calls: AtomicUsize,
    }

    impl MockResolver {
        fn new(resolution: Result<ResolutionResult, ResolveError>) -> Self {
            Self {
                resolutions: Mutex::new(VecDeque::from([resolution])),
                validations: Mutex::new(VecDeque::new()),
                validate_calls: AtomicUsize::new(0),
            }
        }

        fn with_validation(self, validation: ValidationResult) -> Self {
            self.validations.lock().unwrap().push_back(validation);
            self
        }

        fn validate_call_count(&self) -> usize {
            self.validate_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IntentResolverPort for MockResolver {
        async fn resolve(
            &self,
            _intent: &str,
            _context: &RequestContext,
            _catalog: &ToolCatalog,
        ) -> Result<ResolutionResult, ResolveError> {
            self.resolutions
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ResolveError::Generation("no scripted resolution".into())))
        }

        async fn validate(
            &self,
            _intent: &str,
            _resolution: &ResolutionResult,
            _catalog: &ToolCatalog,
        ) -> Result<ValidationResult, ResolveError> {
            self.validate_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .validations
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(ValidationResult::accepted))
        }
    }

    struct MockContent {
        files: Mutex<VecDeque<Result<String, ContentError>>>,
        folders: Mutex<VecDeque<Result<Vec<FolderEntry>, ContentError>>>,
        locations: Mutex<Vec<ContentLocation>>,
    }

    impl MockContent {
        fn new() -> Self {
            Self {
                files: Mutex::new(VecDeque::new()),
                folders: Mutex::new(VecDeque::new()),
                locations: Mutex::new(Vec::new()),
            }
        }

        fn with_file(self, result: Result<String, ContentError>) -> Self {
            self.files.lock().unwrap().push_back(result);
            self
        }

        fn with_folder(self, result: Result<Vec<FolderEntry>, ContentError>) -> Self {
            self.folders.lock().unwrap().push_back(result);
            self
        }

        fn fetch_count(&self) -> usize {
            self.locations.lock().unwrap().len()
        }

        fn last_location(&self) -> ContentLocation {
            self.locations.lock().unwrap().last().unwrap().clone()
        }
    }

    #[async_trait]
    impl RepositoryContentPort for MockContent {
        async fn view_file(&self, location: &ContentLocation) -> Result<String, ContentError> {
            self.locations.lock().unwrap().push(location.clone());
            self.files
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ContentError::Transport("no scripted file".into())))
        }

        async fn view_folder(
            &self,
            location: &ContentLocation,
        ) -> Result<Vec<FolderEntry>, ContentError> {
            self.locations.lock().unwrap().push(location.clone());
            self.folders
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ContentError::Transport("no scripted folder".into())))
        }
    }

    fn sample_allow_list() -> AllowList {
        AllowList::new().with_entry(
            "OpenAgentsInc/snowball",
            AllowListEntry::new(["README.md", "package.json", "docs/"], ["main"]),
        )
    }

    fn use_case(resolver: MockResolver, content: MockContent) -> (DispatchUseCase, Arc<MockContent>) {
        let content = Arc::new(content);
        let use_case = DispatchUseCase::new(
            Arc::new(resolver),
            content.clone(),
            ToolCatalog::builtin(),
            sample_allow_list(),
            RepoDefaults::default(),
        );
        (use_case, content)
    }

    fn resolution(tool: &str, confidence: f64) -> ResolutionResult {
        ResolutionResult::new(tool, Confidence::new(confidence))
            .with_reasoning("scripted resolution")
    }

    fn error_message(response: &DispatchResponse) -> String {
        match &response.body {
            ResponseBody::Error { error, .. } => error.clone(),
            ResponseBody::Success { .. } => panic!("expected an error body"),
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_readme_intent_end_to_end() {
        // Scenario A: loose "readme" reference resolves, normalizes, and
        // fetches with default owner/repo/branch
        let resolver = MockResolver::new(Ok(
            resolution("view_file", 0.9).with_parameter("path", "readme")
        ));
        let content = MockContent::new().with_file(Ok("# Snowball".to_string()));
        let (use_case, content) = use_case(resolver, content);

        let response = use_case
            .execute(DispatchRequest::intent("show me the readme"))
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            ResponseBody::Success {
                result: Content::File("# Snowball".into())
            }
        );

        let location = content.last_location();
        assert_eq!(location.path, "README.md");
        assert_eq!(location.owner, "OpenAgentsInc");
        assert_eq!(location.repo, "snowball");
        assert_eq!(location.branch, "main");
    }

    #[tokio::test]
    async fn test_unauthorized_path_never_reaches_upstream() {
        // Scenario B: src/ is not allow-listed
        let resolver = MockResolver::new(Ok(
            resolution("view_folder", 0.95).with_parameter("path", "src/components")
        ));
        let (use_case, content) = use_case(resolver, MockContent::new());

        let response = use_case
            .execute(DispatchRequest::intent("view folder src/components"))
            .await;

        assert_eq!(response.status, 403);
        assert!(error_message(&response).contains("not publicly accessible"));
        assert_eq!(content.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_confidence_below_low_rejects_without_validation() {
        let resolver = MockResolver::new(Ok(
            resolution("view_file", 0.49).with_parameter("path", "README.md")
        ));
        let resolver_handle = Arc::new(resolver);
        let content = Arc::new(MockContent::new());
        let use_case = DispatchUseCase::new(
            resolver_handle.clone(),
            content.clone(),
            ToolCatalog::builtin(),
            sample_allow_list(),
            RepoDefaults::default(),
        );

        let response = use_case
            .execute(DispatchRequest::intent("do something with a file maybe"))
            .await;

        assert_eq!(response.status, 400);
        assert!(error_message(&response).contains("scripted resolution"));
        assert_eq!(resolver_handle.validate_call_count(), 0);
        assert_eq!(content.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_confidence_at_low_boundary_triggers_validation() {
        let resolver = MockResolver::new(Ok(
            resolution("view_file", 0.5).with_parameter("path", "README.md")
        ))
        .with_validation(ValidationResult::accepted());
        let resolver_handle = Arc::new(resolver);
        let content = Arc::new(MockContent::new().with_file(Ok("text".to_string())));
        let use_case = DispatchUseCase::new(
            resolver_handle.clone(),
            content,
            ToolCatalog::builtin(),
            sample_allow_list(),
            RepoDefaults::default(),
        );

        let response = use_case
            .execute(DispatchRequest::intent("read the readme"))
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(resolver_handle.validate_call_count(), 1);
    }

    #[tokio::test]
    async fn test_confidence_at_high_boundary_skips_validation() {
        let resolver = MockResolver::new(Ok(
            resolution("view_file", 0.7).with_parameter("path", "README.md")
        ));
        let resolver_handle = Arc::new(resolver);
        let content = Arc::new(MockContent::new().with_file(Ok("text".to_string())));
        let use_case = DispatchUseCase::new(
            resolver_handle.clone(),
            content,
            ToolCatalog::builtin(),
            sample_allow_list(),
            RepoDefaults::default(),
        );

        let response = use_case
            .execute(DispatchRequest::intent("read the readme"))
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(resolver_handle.validate_call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_validation_reports_missing_parameters() {
        let resolver = MockResolver::new(Ok(resolution("view_file", 0.6))).with_validation(
            ValidationResult {
                is_valid: false,
                missing_parameters: vec!["path".to_string()],
                suggested_prompt: Some("Try naming the file you want".to_string()),
                reasoning: "No file could be identified".to_string(),
            },
        );
        let (use_case, content) = use_case(resolver, MockContent::new());

        let response = use_case.execute(DispatchRequest::intent("read it")).await;

        assert_eq!(response.status, 400);
        match &response.body {
            ResponseBody::Error {
                error,
                missing_parameters,
            } => {
                assert!(error.contains("No file could be identified"));
                assert_eq!(missing_parameters.as_deref(), Some(&["path".to_string()][..]));
            }
            _ => panic!("expected an error body"),
        }
        assert_eq!(content.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_defaults_do_not_overwrite_explicit_parameters() {
        let resolver = MockResolver::new(Ok(resolution("view_file", 0.9)
            .with_parameter("path", "docs/guide.md")
            .with_parameter("owner", "acme")
            .with_parameter("repo", "widgets")
            .with_parameter("branch", "release")));
        let content = MockContent::new().with_file(Ok("guide".to_string()));
        let content = Arc::new(content);
        let allow_list = AllowList::new().with_entry(
            "acme/widgets",
            AllowListEntry::new(["docs/"], ["release"]),
        );
        let use_case = DispatchUseCase::new(
            Arc::new(resolver),
            content.clone(),
            ToolCatalog::builtin(),
            allow_list,
            RepoDefaults::default(),
        );

        let response = use_case
            .execute(DispatchRequest::intent("read docs/guide.md from acme widgets"))
            .await;

        assert_eq!(response.status, 200);
        let location = content.last_location();
        assert_eq!(location.owner, "acme");
        assert_eq!(location.repo, "widgets");
        assert_eq!(location.branch, "release");
        assert_eq!(location.path, "docs/guide.md");
    }

    #[tokio::test]
    async fn test_empty_intent_is_missing_intent() {
        let resolver = MockResolver::new(Ok(resolution("view_file", 0.9)));
        let (use_case, _) = use_case(resolver, MockContent::new());

        let response = use_case.execute(DispatchRequest::intent("   ")).await;

        assert_eq!(response.status, 400);
        assert_eq!(error_message(&response), "No intent provided");
    }

    #[tokio::test]
    async fn test_resolver_missing_parameter_message_is_verbatim() {
        let resolver = MockResolver::new(Err(ResolveError::MissingParameter(
            "Please specify which file you want to read".to_string(),
        )));
        let (use_case, _) = use_case(resolver, MockContent::new());

        let response = use_case.execute(DispatchRequest::intent("read")).await;

        assert_eq!(response.status, 400);
        assert_eq!(
            error_message(&response),
            "Please specify which file you want to read"
        );
    }

    #[tokio::test]
    async fn test_not_found_echoes_path() {
        let resolver = MockResolver::new(Ok(
            resolution("view_file", 0.9).with_parameter("path", "README.md")
        ));
        let content = MockContent::new().with_file(Err(ContentError::NotFound {
            path: "README.md".to_string(),
        }));
        let (use_case, _) = use_case(resolver, content);

        let response = use_case
            .execute(DispatchRequest::intent("show the readme"))
            .await;

        assert_eq!(response.status, 404);
        assert!(error_message(&response).contains("README.md"));
    }

    #[tokio::test]
    async fn test_authentication_failure_maps_to_503_with_generic_message() {
        let resolver = MockResolver::new(Ok(
            resolution("view_file", 0.9).with_parameter("path", "README.md")
        ));
        let content = MockContent::new().with_file(Err(ContentError::AuthenticationFailed));
        let (use_case, _) = use_case(resolver, content);

        let response = use_case
            .execute(DispatchRequest::intent("show the readme"))
            .await;

        assert_eq!(response.status, 503);
        let message = error_message(&response);
        assert!(!message.to_lowercase().contains("token"));
        assert!(message.contains("try again later"));
    }

    #[tokio::test]
    async fn test_upstream_error_maps_to_500() {
        let resolver = MockResolver::new(Ok(
            resolution("view_file", 0.9).with_parameter("path", "README.md")
        ));
        let content = MockContent::new().with_file(Err(ContentError::Upstream {
            status: 502,
            status_text: "Bad Gateway".to_string(),
        }));
        let (use_case, _) = use_case(resolver, content);

        let response = use_case
            .execute(DispatchRequest::intent("show the readme"))
            .await;

        assert_eq!(response.status, 500);
        assert!(error_message(&response).contains("502"));
    }

    #[tokio::test]
    async fn test_folder_listing_preserves_upstream_order() {
        let entries = vec![
            FolderEntry {
                name: "zeta.md".into(),
                entry_type: EntryKind::File,
                path: "docs/zeta.md".into(),
                size: 10,
            },
            FolderEntry {
                name: "alpha.md".into(),
                entry_type: EntryKind::File,
                path: "docs/alpha.md".into(),
                size: 20,
            },
        ];
        let resolver = MockResolver::new(Ok(
            resolution("view_folder", 0.9).with_parameter("path", "docs/")
        ));
        let content = MockContent::new().with_folder(Ok(entries.clone()));
        let (use_case, _) = use_case(resolver, content);

        let response = use_case
            .execute(DispatchRequest::intent("list the docs folder"))
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            ResponseBody::Success {
                result: Content::Folder(entries)
            }
        );
    }

    #[tokio::test]
    async fn test_direct_invocation_of_unknown_tool() {
        let resolver = MockResolver::new(Ok(resolution("view_file", 0.9)));
        let (use_case, _) = use_case(resolver, MockContent::new());

        let response = use_case
            .execute(DispatchRequest::tool("create_file", HashMap::new()))
            .await;

        assert_eq!(response.status, 400);
        assert!(error_message(&response).contains("create_file"));
    }

    #[tokio::test]
    async fn test_direct_invocation_reports_missing_parameters() {
        let resolver = MockResolver::new(Ok(resolution("view_file", 0.9)));
        let (use_case, content) = use_case(resolver, MockContent::new());

        let mut parameters = HashMap::new();
        parameters.insert("path".to_string(), serde_json::json!("README.md"));

        let response = use_case
            .execute(DispatchRequest::tool("view_file", parameters))
            .await;

        assert_eq!(response.status, 400);
        match &response.body {
            ResponseBody::Error {
                error,
                missing_parameters,
            } => {
                assert!(error.contains("owner, repo, branch"));
                assert_eq!(
                    missing_parameters.as_deref(),
                    Some(&["owner".to_string(), "repo".to_string(), "branch".to_string()][..])
                );
            }
            _ => panic!("expected an error body"),
        }
        assert_eq!(content.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_direct_invocation_is_authorized_and_executed() {
        let resolver = MockResolver::new(Ok(resolution("view_file", 0.9)));
        let content = MockContent::new().with_file(Ok("{}".to_string()));
        let (use_case, content) = use_case(resolver, content);

        let mut parameters = HashMap::new();
        parameters.insert("path".to_string(), serde_json::json!("package.json"));
        parameters.insert("owner".to_string(), serde_json::json!("OpenAgentsInc"));
        parameters.insert("repo".to_string(), serde_json::json!("snowball"));
        parameters.insert("branch".to_string(), serde_json::json!("main"));

        let response = use_case
            .execute(DispatchRequest::tool("view_file", parameters))
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(content.fetch_count(), 1);
        assert_eq!(content.last_location().path, "package.json");
    }

    #[tokio::test]
    async fn test_request_body_shapes_deserialize() {
        let intent: DispatchRequest = serde_json::from_str(
            r#"{"intent": "show the readme", "context": {"repo": "snowball"}}"#,
        )
        .unwrap();
        assert!(matches!(intent, DispatchRequest::Intent { .. }));

        let direct: DispatchRequest = serde_json::from_str(
            r#"{"tool": "view_file", "parameters": {"path": "README.md"}}"#,
        )
        .unwrap();
        assert!(matches!(direct, DispatchRequest::Direct { .. }));
    }

    #[test]
    fn test_error_body_serializes_camel_case() {
        let response = DispatchResponse::from_error(&DispatchError::ValidationFailed {
            reasoning: "missing file".into(),
            suggested_prompt: None,
            missing_parameters: vec!["path".into()],
        });

        let value = serde_json::to_value(&response.body).unwrap();
        assert_eq!(value["missingParameters"][0], "path");
        assert!(value.get("missing_parameters").is_none());
    }

    #[test]
    fn test_success_body_wire_shape() {
        let response = DispatchResponse::ok(Content::File("hello".into()));
        let value = serde_json::to_value(&response.body).unwrap();
        assert_eq!(value, serde_json::json!({ "result": "hello" }));
    }

    #[test]
    fn test_unexpected_errors_are_classified() {
        let auth = DispatchResponse::from_unexpected("GitHub authentication failed upstream");
        assert_eq!(auth.status, 503);

        let generic = DispatchResponse::from_unexpected("something odd");
        assert_eq!(generic.status, 500);
        assert_eq!(error_message(&generic), "Internal server error");
    }
}
