//! Tool domain traits
//!
//! Pure validation of tool calls against their catalog definitions.
//! No I/O happens here; the async execution port lives in the
//! application layer.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for direct tool invocations
pub trait ToolCallValidator {
    /// Validate a tool call against its definition.
    ///
    /// Returns the ordered list of missing required parameter names;
    /// an empty list means the call is well-formed.
    fn missing_parameters(&self, call: &ToolCall, definition: &ToolDefinition) -> Vec<String>;
}

/// Default implementation of [`ToolCallValidator`]
///
/// A parameter counts as missing when it is absent, or present but not a
/// non-empty string (every catalog parameter is string-typed).
#[derive(Debug, Clone, Default)]
pub struct DefaultToolCallValidator;

impl ToolCallValidator for DefaultToolCallValidator {
    fn missing_parameters(&self, call: &ToolCall, definition: &ToolDefinition) -> Vec<String> {
        definition
            .parameters
            .iter()
            .filter(|p| p.required)
            .filter(|p| {
                call.get_string(&p.name)
                    .map(|s| s.is_empty())
                    .unwrap_or(true)
            })
            .map(|p| p.name.clone())
            .collect()
    }
}
