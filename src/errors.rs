use std::fmt;
use thiserror::Error;

use crate::core::models::Channel;

/// Input rejected before (or, for the model-side variants, because of) the remote call.
/// The message of every variant is shown to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Text cannot be empty")]
    Empty,

    #[error(
        "Text has too few sentences. At least {min} complete sentences are required, found {found}."
    )]
    TooFewSentences { min: usize, found: usize },

    #[error(
        "{channel}: Text too short. Minimum {min} words required. Your text has {found} words."
    )]
    TooShort {
        channel: Channel,
        min: usize,
        found: usize,
    },

    #[error(
        "{channel}: Text too long. Maximum {max} words allowed. Your text has {found} words."
    )]
    TooLong {
        channel: Channel,
        max: usize,
        found: usize,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown style '{0}'. Supported styles: brief, standard, detailed, bullet_points, custom")]
    UnknownStyle(String),

    #[error("custom_prompt is required when style is 'custom'")]
    MissingCustomPrompt,

    #[error("{0}")]
    InvalidCustomPrompt(String),

    #[error("A file is required")]
    MissingFile,

    #[error("Unsupported file type '{extension}'. Allowed extensions: .txt, .md, .csv, .json, .pdf")]
    UnsupportedFileType { extension: String },

    #[error("File too large. Maximum size is {}MB", .limit_bytes / (1024 * 1024))]
    FileTooLarge { limit_bytes: usize },

    #[error("File is empty")]
    EmptyFile,

    #[error("Could not decode file as UTF-8. Please upload a text file.")]
    UndecodableFile,

    #[error("No readable text could be extracted from the file")]
    NoExtractableText,

    #[error(
        "The model could not process this text. Make sure it is written in complete sentences with proper punctuation."
    )]
    MalformedStructure,

    #[error("The text is too long for the model to process. Please shorten it and try again.")]
    InputTooLongForModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    RateLimited,
    ModelFailure,
    Timeout,
}

/// A classified failure of the remote model. Carries no upstream text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
}

impl RemoteError {
    #[must_use]
    pub fn new(kind: RemoteErrorKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            RemoteErrorKind::RateLimited => {
                "The summarization service is receiving too many requests. Please try again in a moment."
            }
            RemoteErrorKind::ModelFailure => {
                "The summarization model failed to generate a summary. Please try again later."
            }
            RemoteErrorKind::Timeout => {
                "The summarization model took too long to respond. Try shortening the input."
            }
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for RemoteError {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),

    #[error("{name} is invalid: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Summarization is unavailable: {0}")]
    Configuration(#[from] ConfigError),
}

impl SummarizerError {
    /// HTTP status the error is surfaced with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SummarizerError::Validation(_) => 400,
            SummarizerError::Remote(e) => match e.kind {
                RemoteErrorKind::RateLimited => 429,
                RemoteErrorKind::ModelFailure => 502,
                RemoteErrorKind::Timeout => 504,
            },
            SummarizerError::Configuration(_) => 503,
        }
    }

    /// Message placed in the `detail` field of the error body.
    #[must_use]
    pub fn detail(&self) -> String {
        self.to_string()
    }
}
