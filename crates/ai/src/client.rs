//! # External Model Client
//!
//! `reqwest` client for an OpenAI-compatible chat completions endpoint,
//! with optional inline images for the photo analysis mode. Errors are
//! classified so the pipeline can tell transient failures (retry with
//! backoff) from permanent ones (fall back immediately).

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::AiConfig;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty completion in response")]
    EmptyResponse,
}

impl ModelError {
    /// Transient errors are worth another attempt: HTTP 429, HTTP 503, or
    /// a client-side timeout. Everything else abandons the call.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ModelError::RateLimited(_) | ModelError::Unavailable(_) | ModelError::Timeout(_)
        )
    }

    /// Message suitable for showing to a member alongside a fallback plan.
    pub fn user_message(&self) -> String {
        match self {
            ModelError::RateLimited(_) => {
                "The recommendation service is busy right now; showing a standard plan instead."
                    .to_string()
            }
            ModelError::Unavailable(_) | ModelError::Network(_) => {
                "The recommendation service could not be reached; showing a standard plan instead."
                    .to_string()
            }
            ModelError::Timeout(_) => {
                "The recommendation service took too long to answer; showing a standard plan instead."
                    .to_string()
            }
            ModelError::Status { status, .. } => format!(
                "The recommendation service returned an unexpected error ({status}); showing a standard plan instead."
            ),
            ModelError::EmptyResponse => {
                "The recommendation service returned an empty answer; showing a standard plan instead."
                    .to_string()
            }
        }
    }
}

/// Prompt plus an optional inlined image.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

#[derive(Debug, Clone)]
pub struct InlineImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Seam between the pipeline and the concrete HTTP client, so tests can
/// script responses and count calls.
#[async_trait]
pub trait VisionClient: Send + Sync {
    fn model_name(&self) -> &str;

    async fn complete(&self, request: &ModelRequest) -> Result<String, ModelError>;
}

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Vision/text client over an OpenAI-compatible chat completions API.
pub struct HttpVisionClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpVisionClient {
    /// Builds a client when an API key is configured; None otherwise, which
    /// the pipeline treats as fallback-only mode.
    pub fn from_config(config: &AiConfig) -> eyre::Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        }))
    }

    fn classify_status(status: u16, body: &str) -> ModelError {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .map(|parsed| parsed.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());

        match status {
            429 => ModelError::RateLimited(message),
            503 => ModelError::Unavailable(message),
            _ => ModelError::Status { status, message },
        }
    }
}

#[async_trait]
impl VisionClient for HttpVisionClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &ModelRequest) -> Result<String, ModelError> {
        let mut content = vec![ContentPart::Text {
            text: request.prompt.clone(),
        }];

        if let Some(image) = &request.image {
            let encoded = BASE64.encode(&image.bytes);
            content.push(ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{};base64,{}", image.content_type, encoded),
                },
            });
        }

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content,
            }],
            temperature: Some(0.4),
            max_tokens: Some(1024),
        };

        debug!(
            "Sending completion request to {} (model={}, has_image={})",
            self.base_url,
            self.model,
            request.image.is_some()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ModelError::Timeout(err.to_string())
                } else {
                    ModelError::Network(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status.as_u16(), &body_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| ModelError::Network(err.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ModelError::EmptyResponse)
    }
}
