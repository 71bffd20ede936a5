//! Messages endpoint client.

use crate::config::AssistantSettings;
use crate::error::AssistantError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

impl ApiMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Something that can answer a [`MessagesRequest`] with text.
pub trait MessageSender {
    fn send(&self, request: &MessagesRequest) -> Result<String, AssistantError>;
}

/// Map a non-2xx status to the error the caller sees.
pub fn error_for_status(status: u16, body: &str) -> AssistantError {
    match status {
        401 => AssistantError::InvalidApiKey,
        429 => AssistantError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ErrorResponse>(body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.trim().to_string());
            AssistantError::Api { status, message }
        }
    }
}

/// Join the text blocks of a successful response body.
pub fn extract_text(body: &str) -> Result<String, AssistantError> {
    let response: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| AssistantError::MalformedResponse(e.to_string()))?;

    let text: Vec<String> = response
        .content
        .into_iter()
        .filter(|c| c.content_type == "text")
        .filter_map(|c| c.text)
        .collect();

    if text.is_empty() {
        return Err(AssistantError::MalformedResponse(
            "response has no text content".to_string(),
        ));
    }
    Ok(text.join("\n"))
}

pub struct AnthropicClient {
    http: Client,
    endpoint: String,
    api_version: String,
    api_key: Option<String>,
}

impl AnthropicClient {
    pub fn new(settings: &AssistantSettings, api_key: Option<String>) -> Result<Self, AssistantError> {
        // reqwest is built without a default provider; a second install is a no-op
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            api_version: settings.api_version.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Key from `ANTHROPIC_API_KEY`; the client still builds without one.
    pub fn from_env(settings: &AssistantSettings) -> Result<Self, AssistantError> {
        Self::new(settings, std::env::var(API_KEY_ENV).ok())
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl MessageSender for AnthropicClient {
    fn send(&self, request: &MessagesRequest) -> Result<String, AssistantError> {
        let api_key = self.api_key.as_deref().ok_or(AssistantError::MissingApiKey)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            "Sending assistant request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), &body));
        }
        extract_text(&body)
    }
}
