//! Maps raw remote failures onto the caller-facing error taxonomy.

use tracing::warn;

use super::client::RawModelError;
use crate::errors::{RemoteError, RemoteErrorKind, SummarizerError, ValidationError};

const MALFORMED_INPUT_PATTERNS: &[&str] = &["index out of range", "indexerror"];

const TOO_LONG_PATTERNS: &[&str] = &[
    "sequence length",
    "too long",
    "maximum length",
    "exceeds the maximum",
    "input is too long",
];

const RATE_LIMIT_PATTERNS: &[&str] = &["rate limit", "too many requests", "quota"];

/// Classifies a failed remote call. The upstream text is logged here and dropped.
#[must_use]
pub fn classify_model_error(error: &RawModelError) -> SummarizerError {
    match error {
        RawModelError::Timeout => RemoteError::new(RemoteErrorKind::Timeout).into(),
        RawModelError::Transport(message) => {
            warn!(error = %message, "Model endpoint unreachable");
            RemoteError::new(RemoteErrorKind::ModelFailure).into()
        }
        RawModelError::InvalidResponse(body) => {
            warn!(body = %body, "Model endpoint returned an unexpected payload");
            RemoteError::new(RemoteErrorKind::ModelFailure).into()
        }
        RawModelError::Status { status, body } => classify_status(*status, body),
    }
}

fn classify_status(status: u16, body: &str) -> SummarizerError {
    warn!(status, body = %body, "Model endpoint returned an error");
    let lowered = body.to_ascii_lowercase();
    let mentions = |patterns: &[&str]| patterns.iter().any(|p| lowered.contains(p));

    if mentions(MALFORMED_INPUT_PATTERNS) {
        return ValidationError::MalformedStructure.into();
    }

    if mentions(TOO_LONG_PATTERNS) {
        return ValidationError::InputTooLongForModel.into();
    }

    if status == 429 || mentions(RATE_LIMIT_PATTERNS) {
        return RemoteError::new(RemoteErrorKind::RateLimited).into();
    }

    match status {
        401 | 403 => warn!("Model endpoint rejected the configured credential"),
        503 if lowered.contains("loading") => warn!("Model is still loading upstream"),
        _ => {}
    }
    RemoteError::new(RemoteErrorKind::ModelFailure).into()
}
