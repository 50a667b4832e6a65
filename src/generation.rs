//! Text generation behind the resolver.
//!
//! [`TextGenerator`] is the only thing the resolver knows about generation.
//! [`OpenAiGenerator`] implements it against an OpenAI-compatible chat
//! completion endpoint.

use crate::error::GenerationError;
use crate::retry::{with_retry_if, RetryConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Generator used when generation mode is off. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Disabled)
    }
}

/// Connection settings for [`OpenAiGenerator`].
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    /// Ignored for reasoning models
    pub temperature: f32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl OpenAiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            temperature: 0.2,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

/// Trim the completion and strip one pair of wrapping quotes.
///
/// Returns `None` when nothing is left.
pub fn clean_completion(raw: &str) -> Option<String> {
    const QUOTES: [(char, char); 5] = [
        ('"', '"'),
        ('\'', '\''),
        ('«', '»'),
        ('“', '”'),
        ('„', '“'),
    ];

    let mut text = raw.trim();
    for (open, close) in QUOTES {
        if text.chars().count() >= 2 && text.starts_with(open) && text.ends_with(close) {
            text = text[open.len_utf8()..text.len() - close.len_utf8()].trim();
            break;
        }
    }

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Chat-completion client with bearer auth, a request timeout and retries
/// for rate limiting, server errors and transport failures.
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: reqwest::Client,
    settings: OpenAiSettings,
    retry: RetryConfig,
}

impl OpenAiGenerator {
    pub fn new(settings: OpenAiSettings) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            settings,
            retry: RetryConfig::generation(),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        let is_reasoning = is_reasoning_model(&self.settings.model);

        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![Message {
                role: "system".to_string(),
                content: prompt.to_string(),
            }],
            // Reasoning models spend tokens before answering
            max_completion_tokens: if is_reasoning { 4000 } else { 500 },
            temperature: if is_reasoning {
                None
            } else {
                Some(self.settings.temperature)
            },
            reasoning_effort: if is_reasoning {
                Some("low".to_string())
            } else {
                None
            },
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.settings.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Decode(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .as_deref()
            .and_then(clean_completion)
            .ok_or(GenerationError::EmptyCompletion)
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = self.build_request(prompt);
        let text = with_retry_if(
            &self.retry,
            "Translation generation",
            || self.send(&request),
            GenerationError::is_retryable,
        )
        .await?;

        debug!(model = %self.settings.model, chars = text.len(), "Generated translation");
        Ok(text)
    }
}
