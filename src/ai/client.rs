//! Remote inference client
//!
//! Encapsulates the single outbound call to the hosted summarization model.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use super::presets::GenerationPreset;

/// JSON body posted to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRequest {
    pub inputs: String,
    pub parameters: GenerationPreset,
}

/// Unclassified failure of the remote call. The body is upstream text and must
/// never reach a caller; see [`super::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawModelError {
    #[error("model endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model request failed: {0}")]
    Transport(String),

    #[error("model request timed out")]
    Timeout,

    #[error("unexpected model response: {0}")]
    InvalidResponse(String),
}

/// The remote sequence-to-sequence model, seen as a black box.
#[async_trait]
pub trait RemoteModel: Send + Sync {
    /// Sends one request and returns the generated text.
    async fn generate(&self, request: &ModelRequest) -> Result<String, RawModelError>;
}

/// Client for a Hugging Face style inference endpoint.
pub struct InferenceClient {
    http: Client,
    endpoint: String,
    api_token: String,
}

impl InferenceClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        endpoint: String,
        api_token: String,
        timeout: Duration,
    ) -> Result<Self, RawModelError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RawModelError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            api_token,
        })
    }
}

#[async_trait]
impl RemoteModel for InferenceClient {
    async fn generate(&self, request: &ModelRequest) -> Result<String, RawModelError> {
        #[cfg(feature = "debug-logs")]
        info!("Sending inference payload: {:?}", request);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            endpoint = %self.endpoint,
            input_chars = request.inputs.chars().count(),
            max_length = request.parameters.max_length,
            "Sending inference request"
        );

        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_token)
            .parse()
            .map_err(|e| RawModelError::Transport(format!("Invalid Authorization header: {e}")))?;
        headers.insert("Authorization", auth_value);

        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(RawModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(map_reqwest_error)?;
        debug!("Inference response: {}", body);

        extract_generated_text(&body)
            .ok_or_else(|| RawModelError::InvalidResponse(body.to_string()))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> RawModelError {
    if e.is_timeout() {
        RawModelError::Timeout
    } else if e.is_decode() {
        RawModelError::InvalidResponse(e.to_string())
    } else {
        RawModelError::Transport(e.to_string())
    }
}

/// Pulls the generated text out of the shapes inference endpoints reply with:
/// `[{"summary_text": ..}]`, `{"summary_text": ..}`, or the same with `generated_text`.
#[must_use]
pub fn extract_generated_text(body: &Value) -> Option<String> {
    let item = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };

    ["summary_text", "generated_text"]
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_str))
        .map(ToString::to_string)
}
