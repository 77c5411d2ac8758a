//! Intent resolution entities

use super::confidence::Confidence;
use crate::tool::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structured hints accompanying an intent request.
///
/// The agent frontend may pass the active repository selection and an
/// already-known path here. Several aliases are accepted because the
/// callers never agreed on one spelling (`path`/`file`/`filepath`,
/// `repo`/`repository`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestContext {
    pub path: Option<String>,
    pub file: Option<String>,
    pub filepath: Option<String>,
    pub folder: Option<String>,
    pub directory: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub repository: Option<String>,
    pub branch: Option<String>,
}

impl RequestContext {
    /// Explicit file path, first alias wins.
    pub fn file_path(&self) -> Option<&str> {
        self.path
            .as_deref()
            .or(self.file.as_deref())
            .or(self.filepath.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Explicit folder path, first alias wins.
    pub fn folder_path(&self) -> Option<&str> {
        self.path
            .as_deref()
            .or(self.folder.as_deref())
            .or(self.directory.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref().filter(|s| !s.is_empty())
    }

    pub fn repo(&self) -> Option<&str> {
        self.repo
            .as_deref()
            .or(self.repository.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref().filter(|s| !s.is_empty())
    }
}

/// Outcome of resolving an intent to a tool selection.
///
/// Produced once per request and never merged with prior results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Selected tool name
    pub tool: String,
    /// Resolver certainty in the selection
    pub confidence: Confidence,
    /// Extracted parameter values
    pub parameters: HashMap<String, serde_json::Value>,
    /// Free-text rationale for diagnostics
    pub reasoning: String,
}

impl ResolutionResult {
    pub fn new(tool: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            tool: tool.into(),
            confidence,
            parameters: HashMap::new(),
            reasoning: String::new(),
        }
    }

    pub fn with_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Get a string parameter
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(|v| v.as_str())
    }

    /// Convert into an executable tool call, carrying the reasoning along.
    pub fn into_call(self) -> ToolCall {
        ToolCall {
            tool_name: self.tool,
            arguments: self.parameters,
            reasoning: if self.reasoning.is_empty() {
                None
            } else {
                Some(self.reasoning)
            },
        }
    }
}

/// Outcome of the second-pass validation for gated-band resolutions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the selection holds up against the tool's schema
    pub is_valid: bool,
    /// Required parameters the validator found absent or nonsensical
    pub missing_parameters: Vec<String>,
    /// Optional rephrasing suggestion for the user
    pub suggested_prompt: Option<String>,
    /// Free-text rationale
    pub reasoning: String,
}

impl ValidationResult {
    /// An accepting result, used by strategies that never gate.
    pub fn accepted() -> Self {
        Self {
            is_valid: true,
            missing_parameters: Vec::new(),
            suggested_prompt: None,
            reasoning: String::new(),
        }
    }
}
