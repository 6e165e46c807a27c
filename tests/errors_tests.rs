use std::error::Error;
use summarizer::core::models::Channel;
use summarizer::errors::{
    ConfigError, RemoteError, RemoteErrorKind, SummarizerError, ValidationError,
};

#[test]
fn test_errors_implement_error_trait() {
    fn assert_error<T: Error + Send + Sync + 'static>(_: &T) {}

    assert_error(&ValidationError::Empty);
    assert_error(&RemoteError::new(RemoteErrorKind::Timeout));
    assert_error(&ConfigError::MissingVar("HF_TOKEN"));
    assert_error(&SummarizerError::from(ValidationError::Empty));
}

#[test]
fn test_validation_error_display() {
    let error = ValidationError::TooShort {
        channel: Channel::Text,
        min: 50,
        found: 12,
    };
    assert_eq!(
        format!("{error}"),
        "Text area: Text too short. Minimum 50 words required. Your text has 12 words."
    );

    let error = ValidationError::TooLong {
        channel: Channel::File,
        max: 4000,
        found: 4001,
    };
    assert_eq!(
        format!("{error}"),
        "File upload: Text too long. Maximum 4000 words allowed. Your text has 4001 words."
    );

    let error = ValidationError::FileTooLarge {
        limit_bytes: 10 * 1024 * 1024,
    };
    assert_eq!(format!("{error}"), "File too large. Maximum size is 10MB");

    assert_eq!(
        format!("{}", ValidationError::MissingCustomPrompt),
        "custom_prompt is required when style is 'custom'"
    );
}

#[test]
fn test_status_codes() {
    let cases = [
        (SummarizerError::from(ValidationError::Empty), 400),
        (ValidationError::MalformedStructure.into(), 400),
        (ValidationError::InputTooLongForModel.into(), 400),
        (RemoteError::new(RemoteErrorKind::RateLimited).into(), 429),
        (RemoteError::new(RemoteErrorKind::ModelFailure).into(), 502),
        (RemoteError::new(RemoteErrorKind::Timeout).into(), 504),
        (ConfigError::MissingVar("HF_TOKEN").into(), 503),
    ];

    for (error, expected) in cases {
        assert_eq!(error.status_code(), expected, "status for {error:?}");
    }
}

#[test]
fn test_details_are_caller_facing() {
    let structure = SummarizerError::from(ValidationError::MalformedStructure).detail();
    assert!(structure.contains("complete sentences"));
    assert!(structure.contains("punctuation"));
    assert!(!structure.to_lowercase().contains("index"));

    let timeout = SummarizerError::from(RemoteError::new(RemoteErrorKind::Timeout)).detail();
    assert!(timeout.contains("shortening"));

    let config = SummarizerError::from(ConfigError::MissingVar("HF_TOKEN")).detail();
    assert_eq!(config, "Summarization is unavailable: HF_TOKEN is not set");
}
