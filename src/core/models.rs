use serde::{Deserialize, Serialize};
use std::fmt;

/// Input pathway a piece of text arrived through. Selects the word-count bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Text,
    File,
}

impl Channel {
    /// Human-readable source label used in validation messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Channel::Text => "Text area",
            Channel::File => "File upload",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// JSON body of `POST /api/summarize`.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

/// The only record handed back to callers on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub style: String,
    pub word_count: usize,
}

/// A file as received from a multipart upload, before any decoding.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Counts whitespace-delimited tokens.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
