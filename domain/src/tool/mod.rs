//! Tool domain module
//!
//! Defines the fixed catalog of GitHub-reading tools the dispatcher can
//! execute, and how invocations are represented and validated.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolCatalog  │───▶│ ToolCall     │───▶│ Content      │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! The catalog is immutable and populated at process start. The executable
//! set is the closed [`GithubTool`] enum — a tool name resolves through the
//! catalog into exactly one variant, never through a dynamic handler map.

pub mod entities;
pub mod traits;

pub use entities::{GithubTool, ToolCall, ToolCatalog, ToolDefinition, ToolParameter};
pub use traits::{DefaultToolCallValidator, ToolCallValidator};
