use async_trait::async_trait;
use patternhub_core::{ChatMessage, LLMProvider, LLMResponse, Usage};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info};

use crate::retry::{RetryPolicy, Transient, retry_with_backoff};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API key rejected ({0})")]
    Unauthorized(StatusCode),

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl Transient for ProviderError {
    fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Unauthorized(_) | Self::InvalidResponse(_) => false,
        }
    }
}

/// OpenAI-compatible `/chat/completions` client.
pub struct ChatCompletionsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryPolicy,
}

impl ChatCompletionsProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating ChatCompletionsProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn try_send(&self, request: &Value) -> Result<LLMResponse, ProviderError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized(status));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let body = response.json::<Value>().await?;
        parse_completion(&body)
    }
}

fn token_count(usage: &serde_json::Map<String, Value>, key: &str) -> u32 {
    usage
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

/// Extract the first choice's message and the token usage from a
/// chat-completions response body.
pub fn parse_completion(body: &Value) -> Result<LLMResponse, ProviderError> {
    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse("missing content".to_string()))?
        .to_string();

    let usage = body["usage"].as_object().map(|u| Usage {
        prompt_tokens: token_count(u, "prompt_tokens"),
        completion_tokens: token_count(u, "completion_tokens"),
        total_tokens: token_count(u, "total_tokens"),
    });

    Ok(LLMResponse { content, usage })
}

#[async_trait]
impl LLMProvider for ChatCompletionsProvider {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": model,
            "messages": messages,
        });

        info!("Sending chat completion request: model={}", model);
        let response = retry_with_backoff(|| self.try_send(&request), &self.retry).await?;
        if let Some(usage) = &response.usage {
            debug!(
                "Token usage: prompt={} completion={} total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        info!("Received chat completion response");
        Ok(response)
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}
