use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::sentences::count_sentences;
use crate::core::models::{Channel, count_words};
use crate::errors::ValidationError;

/// Below this many sentences the remote model tends to fail outright.
pub const MIN_SENTENCES: usize = 3;

// C0 controls except tab/newline/carriage return, DEL, and the C1 range.
static CONTROL_CHARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F-\x9F]").expect("static regex compile")
});

static REPEATED_TERMINATORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?])[.!?]+").expect("static regex compile"));

/// Inclusive word-count window for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordBounds {
    pub min: usize,
    pub max: usize,
}

/// Word-count windows for both channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationLimits {
    pub text: WordBounds,
    pub file: WordBounds,
}

impl ValidationLimits {
    #[must_use]
    pub fn bounds(&self, channel: Channel) -> WordBounds {
        match channel {
            Channel::Text => self.text,
            Channel::File => self.file,
        }
    }
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            text: WordBounds { min: 50, max: 1500 },
            file: WordBounds {
                min: 100,
                max: 4000,
            },
        }
    }
}

/// Text that passed every normalization and validation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    channel: Channel,
    word_count: usize,
    sentence_count: usize,
}

impl NormalizedText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }
}

/// Cleans and validates `raw` against the default limits.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the cleaned text is empty, has fewer than
/// three sentences, or its word count falls outside the channel bounds.
pub fn normalize(raw: &str, channel: Channel) -> Result<NormalizedText, ValidationError> {
    normalize_with(raw, channel, &ValidationLimits::default())
}

/// Cleans and validates `raw` against the given limits.
///
/// # Errors
///
/// See [`normalize`].
pub fn normalize_with(
    raw: &str,
    channel: Channel,
    limits: &ValidationLimits,
) -> Result<NormalizedText, ValidationError> {
    let text = clean_text(raw);
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }

    let sentence_count = count_sentences(&text);
    if sentence_count < MIN_SENTENCES {
        return Err(ValidationError::TooFewSentences {
            min: MIN_SENTENCES,
            found: sentence_count,
        });
    }

    let word_count = count_words(&text);
    let bounds = limits.bounds(channel);
    if word_count < bounds.min {
        return Err(ValidationError::TooShort {
            channel,
            min: bounds.min,
            found: word_count,
        });
    }
    if word_count > bounds.max {
        return Err(ValidationError::TooLong {
            channel,
            max: bounds.max,
            found: word_count,
        });
    }

    Ok(NormalizedText {
        text,
        channel,
        word_count,
        sentence_count,
    })
}

/// Runs the cleaning steps only: whitespace collapse, control character removal,
/// terminator de-duplication and the terminal period guarantee.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    let stripped = CONTROL_CHARS_RE.replace_all(&collapsed, "");
    // removing a control char can leave two spaces next to each other
    let stripped = collapse_whitespace(&stripped);
    let deduped = REPEATED_TERMINATORS_RE.replace_all(&stripped, "$1");
    ensure_terminal_punctuation(&deduped)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn ensure_terminal_punctuation(text: &str) -> String {
    let core = text.trim_end_matches(['"', '\'', ')', ']', '\u{201D}', '\u{2019}']);
    if text.is_empty() || core.ends_with(['.', '!', '?']) {
        return text.to_string();
    }
    format!("{text}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n)
            .map(|i| {
                let word = if i % 10 == 0 { "Data" } else { "point" };
                if i % 10 == 9 || i + 1 == n {
                    format!("{word}.")
                } else {
                    word.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Hello\n\t world  \r\n again. "), "Hello world again.");
    }

    #[test]
    fn test_clean_text_strips_control_chars() {
        assert_eq!(
            clean_text("Test\u{0}with\u{1F}control\u{7F}chars \u{1} here."),
            "Testwithcontrolchars here."
        );
        assert_eq!(clean_text("C1\u{85}range\u{9C}too."), "C1 rangetoo.");
    }

    #[test]
    fn test_clean_text_dedupes_terminators() {
        assert_eq!(clean_text("Wait... What?!? Really!!"), "Wait. What? Really!");
    }

    #[test]
    fn test_clean_text_appends_period() {
        assert_eq!(clean_text("No punctuation"), "No punctuation.");
        assert_eq!(clean_text("Quoted \"end.\""), "Quoted \"end.\"");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(normalize("  \n\t ", Channel::Text), Err(ValidationError::Empty));
        assert_eq!(normalize("\u{0}\u{1}", Channel::Text), Err(ValidationError::Empty));
    }

    #[test]
    fn test_sentence_floor() {
        let limits = ValidationLimits {
            text: WordBounds { min: 1, max: 100 },
            file: WordBounds { min: 1, max: 100 },
        };
        assert_eq!(
            normalize_with("AI is great. ML is cool", Channel::Text, &limits),
            Err(ValidationError::TooFewSentences { min: 3, found: 2 })
        );
        let ok = normalize_with("AI is great. ML is cool. DL is amazing.", Channel::Text, &limits)
            .unwrap();
        assert_eq!(ok.sentence_count(), 3);
    }

    #[test]
    fn test_text_channel_bounds() {
        assert!(matches!(
            normalize(&words(49), Channel::Text),
            Err(ValidationError::TooShort { min: 50, found: 49, .. })
        ));
        assert_eq!(normalize(&words(50), Channel::Text).unwrap().word_count(), 50);
        assert_eq!(normalize(&words(1500), Channel::Text).unwrap().word_count(), 1500);
        assert!(matches!(
            normalize(&words(1501), Channel::Text),
            Err(ValidationError::TooLong { max: 1500, found: 1501, .. })
        ));
    }

    #[test]
    fn test_file_channel_bounds() {
        assert!(matches!(
            normalize(&words(99), Channel::File),
            Err(ValidationError::TooShort { min: 100, .. })
        ));
        assert!(normalize(&words(100), Channel::File).is_ok());
        assert!(normalize(&words(4000), Channel::File).is_ok());
        assert!(matches!(
            normalize(&words(4001), Channel::File),
            Err(ValidationError::TooLong { max: 4000, .. })
        ));
    }

    #[test]
    fn test_error_messages_name_the_bound() {
        let err = normalize(&words(30), Channel::Text).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("too short"), "{msg}");
        assert!(msg.contains("50"), "{msg}");
        assert!(msg.contains("Text area"), "{msg}");

        let err = normalize(&words(4001), Channel::File).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("too long"), "{msg}");
        assert!(msg.contains("4000"), "{msg}");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = format!("  {}\n\n\u{7}Extra   line!!  Trailing bit", words(60));
        let once = normalize(&raw, Channel::Text).unwrap();
        let twice = normalize(once.as_str(), Channel::Text).unwrap();
        assert_eq!(once, twice);
    }
}
