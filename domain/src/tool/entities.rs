//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tool name constant for the file-view tool
pub const VIEW_FILE: &str = "view_file";

/// Tool name constant for the folder-view tool
pub const VIEW_FOLDER: &str = "view_folder";

/// The closed set of executable GitHub-reading tools.
///
/// Write tools (create/delete/modify) are reserved future names and have no
/// variant here, so they can never be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GithubTool {
    /// Fetch raw file contents
    ViewFile,
    /// Fetch a folder listing
    ViewFolder,
}

impl GithubTool {
    pub fn name(&self) -> &'static str {
        match self {
            GithubTool::ViewFile => VIEW_FILE,
            GithubTool::ViewFolder => VIEW_FOLDER,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            VIEW_FILE => Some(GithubTool::ViewFile),
            VIEW_FOLDER => Some(GithubTool::ViewFolder),
            _ => None,
        }
    }

    /// True for tools whose `path` parameter is subject to filename
    /// normalization (file views only).
    pub fn is_file_view(&self) -> bool {
        matches!(self, GithubTool::ViewFile)
    }
}

impl std::fmt::Display for GithubTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Definition of a tool the dispatcher can execute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "view_file")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Names of all required parameters, in declaration order.
    pub fn required_parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// Immutable catalog of available tools.
///
/// Populated once at startup; read-only afterwards. Order is preserved so
/// tool listings (e.g. in resolver prompts) are deterministic.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// The fixed GitHub-reading tool set.
    pub fn builtin() -> Self {
        let repo_params = |tool: ToolDefinition, path_desc: &str| {
            tool.with_parameter(ToolParameter::new("path", path_desc, true))
                .with_parameter(ToolParameter::new("owner", "Repository owner", true))
                .with_parameter(ToolParameter::new("repo", "Repository name", true))
                .with_parameter(ToolParameter::new("branch", "Branch name", true))
        };

        Self::new()
            .register(repo_params(
                ToolDefinition::new(
                    VIEW_FILE,
                    "View contents of a file in a GitHub repository",
                ),
                "Path to the file",
            ))
            .register(repo_params(
                ToolDefinition::new(
                    VIEW_FOLDER,
                    "View contents of a folder in a GitHub repository",
                ),
                "Path to the folder",
            ))
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    /// All tool definitions, in registration order.
    pub fn list(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn find(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
    /// Optional reasoning carried over from resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            reasoning: None,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or a user-facing error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }
}
