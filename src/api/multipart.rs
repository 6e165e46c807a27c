//! `multipart/form-data` decoding for `POST /api/summarize-file`.

use bytes::Bytes;
use multer::{Constraints, Multipart, SizeLimit};
use tracing::debug;

use crate::core::models::UploadedFile;
use crate::errors::ValidationError;

/// Fields of an upload form. Unknown fields are ignored.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub style: Option<String>,
    pub custom_prompt: Option<String>,
}

/// Parses a buffered multipart body. The `file` field is cut off as soon as it
/// grows past `max_file_bytes`.
///
/// # Errors
///
/// Returns [`ValidationError::FileTooLarge`] for an oversized `file` field and
/// [`ValidationError::InvalidRequest`] when the content type carries no boundary
/// or the body is not valid multipart.
pub async fn parse_upload_form(
    content_type: Option<&str>,
    body: Vec<u8>,
    max_file_bytes: usize,
) -> Result<UploadForm, ValidationError> {
    let content_type = content_type.unwrap_or_default();
    let boundary = multer::parse_boundary(content_type).map_err(|e| {
        ValidationError::InvalidRequest(format!("expected multipart/form-data: {e}"))
    })?;

    let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(Bytes::from(body)) });
    let limit = u64::try_from(max_file_bytes).unwrap_or(u64::MAX);
    let constraints = Constraints::new().size_limit(SizeLimit::new().for_field("file", limit));
    let mut multipart = Multipart::with_constraints(stream, boundary, constraints);
    let malformed = |e: multer::Error| match e {
        multer::Error::FieldSizeExceeded { .. } => ValidationError::FileTooLarge {
            limit_bytes: max_file_bytes,
        },
        other => ValidationError::InvalidRequest(format!("malformed multipart body: {other}")),
    };
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        debug!(field = %name, "Multipart field");
        match name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .map(ToString::to_string)
                    .filter(|n| !n.is_empty());
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(malformed)?;
                // A browser submitting an empty file input sends neither name nor bytes.
                if filename.is_none() && bytes.is_empty() {
                    continue;
                }
                form.file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "style" => form.style = Some(field.text().await.map_err(malformed)?),
            "custom_prompt" => form.custom_prompt = Some(field.text().await.map_err(malformed)?),
            _ => {}
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "X-BOUNDARY";

    fn body(parts: &[(&str, Option<&str>, &str)]) -> Vec<u8> {
        let mut out = String::new();
        for (name, filename, value) in parts {
            out.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(f) => out.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: text/plain\r\n\r\n"
                )),
                None => out.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            out.push_str(value);
            out.push_str("\r\n");
        }
        out.push_str(&format!("--{BOUNDARY}--\r\n"));
        out.into_bytes()
    }

    fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    #[tokio::test]
    async fn test_parses_file_and_fields() {
        let body = body(&[
            ("file", Some("notes.txt"), "One. Two. Three."),
            ("style", None, "brief"),
            ("ignored", None, "x"),
        ]);
        let form = parse_upload_form(Some(content_type().as_str()), body, 1024).await.unwrap();

        let file = form.file.unwrap();
        assert_eq!(file.filename.as_deref(), Some("notes.txt"));
        assert_eq!(file.content_type.as_deref(), Some("text/plain"));
        assert_eq!(file.bytes, b"One. Two. Three.");
        assert_eq!(form.style.as_deref(), Some("brief"));
        assert!(form.custom_prompt.is_none());
    }

    #[tokio::test]
    async fn test_missing_boundary() {
        let err = parse_upload_form(Some("application/json"), b"{}".to_vec(), 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected_while_parsing() {
        let big = "a".repeat(64);
        let oversized = body(&[("file", Some("big.txt"), big.as_str()), ("style", None, "brief")]);
        let err = parse_upload_form(Some(content_type().as_str()), oversized, 32)
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::FileTooLarge { limit_bytes: 32 });

        // The limit applies to the file only
        let small = body(&[("file", Some("ok.txt"), "tiny"), ("style", None, big.as_str())]);
        let form = parse_upload_form(Some(content_type().as_str()), small, 32)
            .await
            .unwrap();
        assert_eq!(form.file.unwrap().bytes, b"tiny");
    }

    #[tokio::test]
    async fn test_form_without_file() {
        let body = body(&[("style", None, "detailed")]);
        let form = parse_upload_form(Some(content_type().as_str()), body, 1024).await.unwrap();
        assert!(form.file.is_none());
        assert_eq!(form.style.as_deref(), Some("detailed"));
    }
}
