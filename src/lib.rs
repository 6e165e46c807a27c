/// Summarizer - an HTTP API that condenses prose with a hosted BART model.
///
/// The crate is deployed as a single AWS Lambda behind API Gateway:
/// 1. Input is cleaned and validated locally (whitespace, control characters,
///    sentence count and per-channel word bounds)
/// 2. A style preset is turned into one request to the Hugging Face inference API
/// 3. Remote failures are translated into stable, caller-facing HTTP errors
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda (`lambda_runtime`) for serverless execution
/// - reqwest for the inference API
/// - multer and pdf-extract for file uploads
/// - Tokio for async runtime and request deadlines
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use summarizer::ai::{InferenceClient, Style, Summarizer};
/// use summarizer::core::models::Channel;
/// use summarizer::preprocess::normalize;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Set up structured logging
///     summarizer::setup_logging();
///
///     let client = InferenceClient::new(
///         summarizer::core::config::DEFAULT_MODEL_URL.to_string(),
///         "hf_dummy_token".to_string(),
///         Duration::from_secs(60),
///     )?;
///     let summarizer = Summarizer::new(client, Duration::from_secs(60));
///
///     let article = std::fs::read_to_string("article.txt")?;
///     let text = normalize(&article, Channel::Text)?;
///     let result = summarizer.summarize(&text, &Style::Brief).await?;
///     println!("{} ({} words)", result.summary, result.word_count);
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod extract;
pub mod preprocess;
pub mod prompt;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration, filtered by `RUST_LOG` (default `info`). It
/// should be called once, before the Lambda runtime starts.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // A second call (tests, warm containers) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
