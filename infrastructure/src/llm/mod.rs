//! Structured-generation adapter

pub mod groq;

pub use groq::{GenerationError, GroqClient};
