use std::time::Duration;
use tracing::{info, warn};

use super::classify::classify_model_error;
use super::client::{ModelRequest, RawModelError, RemoteModel};
use super::format::format_as_bullets;
use super::presets::Style;
use crate::core::models::{SummaryResult, count_words};
use crate::errors::{RemoteError, RemoteErrorKind, SummarizerError};
use crate::preprocess::NormalizedText;

/// Builds the outbound request for a style, calls the model once and shapes the reply.
pub struct Summarizer<M> {
    model: M,
    timeout: Duration,
}

impl<M: RemoteModel> Summarizer<M> {
    #[must_use]
    pub fn new(model: M, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The exact request sent for `text` in `style`.
    #[must_use]
    pub fn build_request(text: &NormalizedText, style: &Style) -> ModelRequest {
        ModelRequest {
            inputs: style.model_input(text.as_str()),
            parameters: style.preset(),
        }
    }

    /// Summarizes already validated text.
    ///
    /// # Errors
    ///
    /// Returns a classified [`SummarizerError`] when the model fails, times out,
    /// or replies with nothing.
    pub async fn summarize(
        &self,
        text: &NormalizedText,
        style: &Style,
    ) -> Result<SummaryResult, SummarizerError> {
        let request = Self::build_request(text, style);
        info!(
            style = style.name(),
            input_words = text.word_count(),
            input_sentences = text.sentence_count(),
            channel = %text.channel(),
            "Requesting summary"
        );

        let generated = match tokio::time::timeout(self.timeout, self.model.generate(&request)).await
        {
            Ok(Ok(generated)) => generated,
            Ok(Err(e)) => return Err(classify_model_error(&e)),
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs_f64(), "Model call exceeded deadline");
                return Err(classify_model_error(&RawModelError::Timeout));
            }
        };

        let generated = generated.trim();
        if generated.is_empty() {
            warn!("Model returned an empty summary");
            return Err(RemoteError::new(RemoteErrorKind::ModelFailure).into());
        }

        let summary = match style {
            Style::BulletPoints => format_as_bullets(generated),
            _ => generated.to_string(),
        };
        let word_count = count_words(&summary);
        info!(style = style.name(), output_words = word_count, "Summary generated");

        Ok(SummaryResult {
            summary,
            style: style.name().to_string(),
            word_count,
        })
    }
}
