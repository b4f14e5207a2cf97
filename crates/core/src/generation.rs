use crate::traits::Generator;
use crate::GenerationError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

/// Client for the Gemini `generateContent` REST call.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn request(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": prompt }] }
                ]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let payload: Value = response.json().await?;
        response_text(&payload)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(model = %self.config.model, prompt_chars = prompt.len(), "calling generation api");
        tokio::time::timeout(self.config.timeout, self.request(prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.config.timeout))?
    }
}

/// Concatenates the text parts of the first candidate, skipping thought parts.
fn response_text(payload: &Value) -> Result<String, GenerationError> {
    let parts = payload
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let text = parts
        .iter()
        .filter(|part| !part.get("thought").and_then(Value::as_bool).unwrap_or(false))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<String>();

    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    Ok(text)
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
