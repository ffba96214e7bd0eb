//! Narrative generation through an OpenAI-compatible chat completions API.
//!
//! Any provider speaking the `/chat/completions` protocol works (OpenRouter, OpenAI, a
//! local server). The request carries a single user message: the formatted analysis
//! prompt.

use super::Narrator;
use super::error::{EdgarError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_LLM_API_URL: &str = "https://openrouter.ai/api/v1";

pub const DEFAULT_LLM_MODEL: &str = "google/gemini-2.0-flash-001";

const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// [`Narrator`] calling a chat completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatNarrator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl ChatNarrator {
    /// Creates a narrator for `{base_url}/chat/completions`.
    ///
    /// `api_key` is sent as a bearer token when given.
    pub fn new(base_url: &str, api_key: Option<&str>, model: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| EdgarError::ConfigError(format!("Invalid API key: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| EdgarError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
        })
    }
}

#[async_trait]
impl Narrator for ChatNarrator {
    async fn narrate(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EdgarError::Collaborator(format!(
                "Narrative request failed with {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| EdgarError::Collaborator("Narrative response had no content".into()))
    }
}

/// [`Narrator`] that always declines, for runs that skip the summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNarrator;

#[async_trait]
impl Narrator for DisabledNarrator {
    async fn narrate(&self, _prompt: &str) -> Result<String> {
        Err(EdgarError::Collaborator(
            "narrative generation disabled".to_string(),
        ))
    }
}
