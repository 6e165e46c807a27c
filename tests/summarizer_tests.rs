use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use summarizer::ai::{ModelRequest, RawModelError, RemoteModel, Style, Summarizer};
use summarizer::core::models::{Channel, count_words};
use summarizer::errors::{RemoteErrorKind, SummarizerError};
use summarizer::preprocess::normalize;

const ARTICLE: &str = "Artificial intelligence is changing how companies build software. \
Teams now use models to draft code, review changes and write documentation. \
Early studies report faster delivery but also new kinds of subtle bugs. \
Managers are investing in training so engineers can judge generated output. \
Regulators in several countries are drafting rules on transparency and liability. \
Most experts expect the tools to become a normal part of every workflow.";

/// Replies with a fixed result and remembers every request it saw.
struct ScriptedModel {
    reply: Result<String, RawModelError>,
    seen: Mutex<Vec<ModelRequest>>,
}

impl ScriptedModel {
    fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: RawModelError) -> Self {
        Self {
            reply: Err(error),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RemoteModel for ScriptedModel {
    async fn generate(&self, request: &ModelRequest) -> Result<String, RawModelError> {
        self.seen.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

fn summarizer(model: ScriptedModel) -> Summarizer<ScriptedModel> {
    Summarizer::new(model, Duration::from_secs(5))
}

#[tokio::test]
async fn test_brief_summary_end_to_end() {
    let s = summarizer(ScriptedModel::replying(
        "AI is reshaping software work. Rules and training are following.",
    ));
    let text = normalize(ARTICLE, Channel::Text).unwrap();

    let result = s.summarize(&text, &Style::Brief).await.unwrap();
    assert_eq!(result.style, "brief");
    assert!(result.word_count < text.word_count());
    assert_eq!(result.word_count, count_words(&result.summary));

    let seen = s.model().seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "exactly one remote call per request");
    assert_eq!(seen[0].inputs, ARTICLE);
    assert_eq!(seen[0].parameters.max_length, 60);
}

#[tokio::test]
async fn test_word_count_counts_the_summary() {
    let s = summarizer(ScriptedModel::replying("  one two three four five  "));
    let text = normalize(ARTICLE, Channel::Text).unwrap();

    let result = s.summarize(&text, &Style::Standard).await.unwrap();
    assert_eq!(result.summary, "one two three four five");
    assert_eq!(result.word_count, 5);
}

#[tokio::test]
async fn test_bullet_points_are_formatted() {
    let s = summarizer(ScriptedModel::replying(
        "AI changes software. Teams adopt models. Rules are coming.",
    ));
    let text = normalize(ARTICLE, Channel::Text).unwrap();

    let result = s.summarize(&text, &Style::BulletPoints).await.unwrap();
    assert_eq!(result.style, "bullet_points");
    assert_eq!(
        result.summary,
        "• AI changes software.\n• Teams adopt models.\n• Rules are coming."
    );
    assert_eq!(result.word_count, count_words(&result.summary));
}

#[tokio::test]
async fn test_other_styles_are_not_reformatted() {
    let reply = "AI changes software. Teams adopt models. Rules are coming.";
    let s = summarizer(ScriptedModel::replying(reply));
    let text = normalize(ARTICLE, Channel::Text).unwrap();

    for style in [Style::Brief, Style::Standard, Style::Detailed] {
        let result = s.summarize(&text, &style).await.unwrap();
        assert_eq!(result.summary, reply, "style {style}");
    }
}

#[test]
fn test_requests_are_deterministic() {
    let text = normalize(ARTICLE, Channel::Text).unwrap();
    for style in [Style::Brief, Style::Standard, Style::Detailed, Style::BulletPoints] {
        let first = Summarizer::<ScriptedModel>::build_request(&text, &style);
        let second = Summarizer::<ScriptedModel>::build_request(&text, &style);
        assert_eq!(first, second);
        assert_eq!(first.parameters, style.preset());
    }
}

#[tokio::test]
async fn test_empty_reply_is_a_model_failure() {
    let s = summarizer(ScriptedModel::replying("   "));
    let text = normalize(ARTICLE, Channel::Text).unwrap();

    let err = s.summarize(&text, &Style::Brief).await.unwrap_err();
    assert!(matches!(
        err,
        SummarizerError::Remote(ref e) if e.kind == RemoteErrorKind::ModelFailure
    ));
    assert_eq!(err.status_code(), 502);
}

#[tokio::test]
async fn test_remote_failures_are_classified() {
    let text = normalize(ARTICLE, Channel::Text).unwrap();
    let cases = [
        (RawModelError::Timeout, 504),
        (RawModelError::Transport("connection refused".into()), 502),
        (
            RawModelError::Status {
                status: 500,
                body: "CUDA out of memory".into(),
            },
            502,
        ),
        (
            RawModelError::Status {
                status: 429,
                body: String::new(),
            },
            429,
        ),
        (
            RawModelError::Status {
                status: 400,
                body: "Input sequence length exceeds the maximum".into(),
            },
            400,
        ),
    ];

    for (raw, expected) in cases {
        let s = summarizer(ScriptedModel::failing(raw.clone()));
        let err = s.summarize(&text, &Style::Brief).await.unwrap_err();
        assert_eq!(err.status_code(), expected, "classification of {raw:?}");
        assert!(!err.detail().contains("CUDA"));
    }
}
