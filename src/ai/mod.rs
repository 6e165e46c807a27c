//! Everything that talks to, or prepares for, the remote summarization model

pub mod classify;
pub mod client;
pub mod format;
pub mod presets;
pub mod summarizer;

// Re-export main types for convenience
pub use client::{InferenceClient, ModelRequest, RawModelError, RemoteModel};
pub use presets::{GenerationPreset, Style};
pub use summarizer::Summarizer;
