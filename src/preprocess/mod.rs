//! Input cleanup and validation that runs before any remote call.

pub mod normalize;
pub mod sentences;

pub use normalize::{
    MIN_SENTENCES, NormalizedText, ValidationLimits, WordBounds, clean_text, normalize,
    normalize_with,
};
pub use sentences::{count_sentences, split_sentences};
