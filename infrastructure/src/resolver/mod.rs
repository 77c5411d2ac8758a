//! Intent-resolution strategies
//!
//! Two interchangeable implementations of the application's
//! `IntentResolverPort`, selected by configuration:
//!
//! - [`RegexResolver`] — deterministic first-match-wins pattern dispatch
//! - [`LlmResolver`] — structured-generation selection with confidence
//!   scoring and a second validation pass for the gated band

pub mod llm;
pub mod regex;

pub use llm::LlmResolver;
pub use regex::RegexResolver;
