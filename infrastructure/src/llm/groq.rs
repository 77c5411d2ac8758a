//! Groq structured-generation client
//!
//! Single request/response exchange against an OpenAI-compatible
//! chat-completions endpoint, constrained to JSON output. The expected
//! schema is spelled out in the system prompt; the response body's message
//! content is parsed as one JSON object.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default chat-completions endpoint base.
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default structured-generation model.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f64 = 0.1;

/// Errors from the structured-generation exchange
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Groq auth failed ({0}). Check API key and account access.")]
    Auth(u16),

    #[error("Groq request failed: {0}")]
    Request(String),

    #[error("Groq returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// Client for one-shot structured generation.
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    stream: bool,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl GroqClient {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model
    }

    /// Run one constrained exchange and parse the reply as a JSON object.
    pub async fn generate_object(
        &self,
        system: &str,
        user: &str,
    ) -> Result<serde_json::Value, GenerationError> {
        let endpoint = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .http
            .post(&endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        debug!(model = %self.model, status = status.as_u16(), "Groq response");

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GenerationError::Auth(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Request(format!(
                "{} {}",
                status.as_u16(),
                text
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::InvalidResponse(format!("parse failed: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                GenerationError::InvalidResponse("missing choices[0].message.content".to_string())
            })?;

        serde_json::from_str(&content).map_err(|e| {
            GenerationError::InvalidResponse(format!("content is not a JSON object: {}", e))
        })
    }
}
