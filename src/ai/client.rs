use crate::error::CompletionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a chat-completion POST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pulls `choices[0].message.content` out of a response body.
pub fn extract_content(body: &str) -> Result<String, CompletionError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::Request(format!("invalid response body: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::Request("response contained no choices".to_string()))?;

    Ok(choice.message.content.unwrap_or_default().trim().to_string())
}

/// Transport for a single chat-completion request.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest, api_key: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new() -> Result<Self, CompletionError> {
        Self::with_endpoint(OPENAI_CHAT_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, CompletionError> {
        // Each evaluation runs on its own short-lived runtime, so pooled
        // connections would outlive the runtime that owns them.
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn send(&self, request: &ChatRequest, api_key: &str) -> Result<String, CompletionError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        extract_content(&body)
    }
}

/// Runs one chat completion. An empty key fails before the backend is
/// touched.
pub async fn call_completion(
    backend: &dyn CompletionBackend,
    messages: Vec<ChatMessage>,
    api_key: &str,
    model: &str,
    temperature: f64,
) -> Result<String, CompletionError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(CompletionError::MissingApiKey);
    }

    let request = ChatRequest {
        model: model.to_string(),
        temperature,
        messages,
    };
    backend.send(&request, api_key).await
}
