//! Domain layer for switchboard
//!
//! This crate contains the core business logic for dispatching a voice
//! agent's natural-language instructions onto a fixed set of read-only
//! GitHub repository tools. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Intent → Tool dispatch
//!
//! A free-text **intent** ("show me the readme") is resolved to a concrete
//! tool name plus parameters, producing a [`ResolutionResult`] with a
//! confidence score. The confidence falls into one of three
//! [`ConfidenceBand`]s that decide whether the request proceeds, is
//! re-validated, or is rejected outright.
//!
//! ## Allow-listed access
//!
//! Every content fetch is gated by the [`AllowList`]: only pre-approved
//! repository / branch / path combinations are reachable, no matter what
//! the resolver produced.

pub mod access;
pub mod content;
pub mod core;
pub mod intent;
pub mod tool;

// Re-export commonly used types
pub use access::{AccessDenial, AllowList, AllowListEntry};
pub use content::{Content, ContentLocation, EntryKind, FolderEntry};
pub use core::error::DispatchError;
pub use intent::{
    Confidence, ConfidenceBand, RequestContext, ResolutionResult, ValidationResult,
    normalize_file_path,
};
pub use tool::{
    GithubTool, ToolCall, ToolCatalog, ToolDefinition, ToolParameter,
    traits::{DefaultToolCallValidator, ToolCallValidator},
};
