//! Route handlers. Each returns the response envelope before CORS decoration.

use serde_json::{Value, json};
use tracing::{info, warn};

use super::helpers::{error_response, json_response};
use super::multipart::parse_upload_form;
use super::parsing;
use super::state::AppState;
use crate::ai::{RemoteModel, Style, presets};
use crate::core::models::{Channel, SummaryRequest, SummaryResult};
use crate::errors::{SummarizerError, ValidationError};
use crate::extract::{SUPPORTED_EXTENSIONS, extract_text};
use crate::preprocess::{MIN_SENTENCES, normalize_with};

pub const ROOT_MESSAGE: &str = "Welcome to the AI Summarizer API";

#[must_use]
pub fn root() -> Value {
    json_response(200, &json!({ "message": ROOT_MESSAGE }))
}

#[must_use]
pub fn health<M: RemoteModel>(state: &AppState<M>) -> Value {
    let body = match state.backend() {
        Ok(_) => json!({ "status": "ok", "message": "Summarizer API is running" }),
        Err(e) => {
            warn!("Health check reporting degraded: {}", e);
            json!({ "status": "degraded", "message": format!("Configuration error: {e}") })
        }
    };
    json_response(200, &body)
}

#[must_use]
pub fn model_info<M: RemoteModel>(state: &AppState<M>) -> Value {
    let backend = match state.backend() {
        Ok(b) => b,
        Err(e) => return error_response(&SummarizerError::from(e)),
    };
    let config = &backend.config;

    let styles = json!({
        "brief": presets::BRIEF,
        "standard": presets::STANDARD,
        "detailed": presets::DETAILED,
        "bullet_points": presets::BULLET_POINTS,
        "custom": Style::Custom { instruction: String::new() }.preset(),
    });

    json_response(
        200,
        &json!({
            "model_url": config.model_url,
            "timeout_seconds": config.request_timeout.as_secs(),
            "limits": config.limits,
            "min_sentences": MIN_SENTENCES,
            "max_upload_bytes": config.max_upload_bytes,
            "styles": styles,
            "default_style": Style::default().name(),
            "supported_extensions": SUPPORTED_EXTENSIONS,
        }),
    )
}

/// `POST /api/summarize`
pub async fn summarize_text<M: RemoteModel>(state: &AppState<M>, event: &Value) -> Value {
    match run_text(state, event).await {
        Ok(result) => json_response(200, &result),
        Err(e) => failure(&e),
    }
}

/// `POST /api/summarize-file`
pub async fn summarize_file<M: RemoteModel>(state: &AppState<M>, event: &Value) -> Value {
    match run_file(state, event).await {
        Ok(result) => json_response(200, &result),
        Err(e) => failure(&e),
    }
}

async fn run_text<M: RemoteModel>(
    state: &AppState<M>,
    event: &Value,
) -> Result<SummaryResult, SummarizerError> {
    let backend = state.backend()?;

    let body = parsing::body_bytes(event)?;
    let request: SummaryRequest = serde_json::from_slice(&body)
        .map_err(|e| ValidationError::InvalidRequest(e.to_string()))?;

    let style = Style::from_request(request.style.as_deref(), request.custom_prompt.as_deref())?;
    let text = normalize_with(&request.text, Channel::Text, &backend.config.limits)?;
    backend.summarizer.summarize(&text, &style).await
}

async fn run_file<M: RemoteModel>(
    state: &AppState<M>,
    event: &Value,
) -> Result<SummaryResult, SummarizerError> {
    let backend = state.backend()?;

    let body = parsing::body_bytes(event)?;
    let form = parse_upload_form(
        parsing::header(event, "content-type"),
        body,
        backend.config.max_upload_bytes,
    )
    .await?;

    let style = Style::from_request(form.style.as_deref(), form.custom_prompt.as_deref())?;
    let file = form.file.ok_or(ValidationError::MissingFile)?;
    let raw = extract_text(&file, backend.config.max_upload_bytes)?;
    let text = normalize_with(&raw, Channel::File, &backend.config.limits)?;
    info!(
        filename = file.filename.as_deref().unwrap_or(""),
        words = text.word_count(),
        "Upload validated"
    );
    backend.summarizer.summarize(&text, &style).await
}

fn failure(error: &SummarizerError) -> Value {
    match error {
        SummarizerError::Validation(e) => info!(status = 400, "Rejected input: {}", e),
        other => warn!(status = other.status_code(), "Summarization failed: {}", other),
    }
    error_response(error)
}
