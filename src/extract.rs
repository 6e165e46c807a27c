//! Text extraction for uploaded files.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{info, warn};

use crate::core::models::UploadedFile;
use crate::errors::ValidationError;

/// Extensions accepted by `POST /api/summarize-file`, with their leading dot.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = [".txt", ".md", ".csv", ".json", ".pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    Markdown,
    Csv,
    Json,
    Pdf,
}

impl FileKind {
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(FileKind::PlainText),
            "md" | "markdown" => Some(FileKind::Markdown),
            "csv" => Some(FileKind::Csv),
            "json" => Some(FileKind::Json),
            "pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }

    /// Resolves the kind from the filename, falling back to the declared
    /// content type when the filename carries no extension.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedFileType`] for anything outside the allow-list.
    pub fn detect(
        filename: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let extension = filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str());

        if let Some(ext) = extension {
            return FileKind::from_extension(ext).ok_or_else(|| {
                ValidationError::UnsupportedFileType {
                    extension: format!(".{}", ext.to_ascii_lowercase()),
                }
            });
        }

        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();
        mime_guess::get_mime_extensions_str(&mime)
            .and_then(|exts| exts.iter().find_map(|ext| FileKind::from_extension(ext)))
            .ok_or(ValidationError::UnsupportedFileType {
                extension: if mime.is_empty() {
                    "(none)".to_string()
                } else {
                    mime
                },
            })
    }
}

/// Turns an uploaded file into plain text.
///
/// # Errors
///
/// Fails with a [`ValidationError`] when the file type is not supported, the
/// file is empty or larger than `max_bytes`, or no text can be decoded from it.
pub fn extract_text(file: &UploadedFile, max_bytes: usize) -> Result<String, ValidationError> {
    let kind = FileKind::detect(file.filename.as_deref(), file.content_type.as_deref())?;

    if file.bytes.len() > max_bytes {
        return Err(ValidationError::FileTooLarge {
            limit_bytes: max_bytes,
        });
    }
    if file.bytes.is_empty() {
        return Err(ValidationError::EmptyFile);
    }

    info!(
        filename = file.filename.as_deref().unwrap_or(""),
        bytes = file.bytes.len(),
        kind = ?kind,
        "Extracting text from upload"
    );

    let text = match kind {
        FileKind::Pdf => extract_pdf(&file.bytes)?,
        FileKind::Markdown => strip_markdown(&decode_utf8(&file.bytes)?),
        FileKind::PlainText | FileKind::Csv | FileKind::Json => decode_utf8(&file.bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ValidationError::NoExtractableText);
    }
    Ok(text)
}

fn decode_utf8(bytes: &[u8]) -> Result<String, ValidationError> {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    String::from_utf8(bytes.to_vec()).map_err(|_| ValidationError::UndecodableFile)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ValidationError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        warn!(error = %e, "PDF text extraction failed");
        ValidationError::NoExtractableText
    })
}

static MD_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(```|~~~).*$").expect("static regex compile"));
static MD_LINE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]{0,3}(#{1,6}[ \t]+|>[ \t]?|[-*+][ \t]+|\d+[.)][ \t]+)").expect("static regex compile")
});
static MD_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("static regex compile"));
static MD_EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\*\*|__|\*|`)").expect("static regex compile"));

/// Drops Markdown syntax that would otherwise end up in the model input.
#[must_use]
pub fn strip_markdown(text: &str) -> String {
    let text = MD_FENCE_RE.replace_all(text, "");
    let text = MD_LINE_PREFIX_RE.replace_all(&text, "");
    let text = MD_LINK_RE.replace_all(&text, "$1");
    MD_EMPHASIS_RE.replace_all(&text, "").into_owned()
}
