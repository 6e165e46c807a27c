//! Summary styles and the generation parameters each one sends to the model.

use serde::Serialize;
use std::fmt;

use crate::errors::ValidationError;
use crate::prompt::sanitize_custom_prompt;

/// Generation parameters for one style. Serialized verbatim as the `parameters`
/// object of the inference request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationPreset {
    pub max_length: u32,
    pub min_length: u32,
    pub num_beams: u32,
    pub length_penalty: f32,
    pub early_stopping: bool,
}

pub const BRIEF: GenerationPreset = GenerationPreset {
    max_length: 60,
    min_length: 10,
    num_beams: 4,
    length_penalty: 1.2,
    early_stopping: true,
};

pub const STANDARD: GenerationPreset = GenerationPreset {
    max_length: 140,
    min_length: 30,
    num_beams: 4,
    length_penalty: 1.0,
    early_stopping: true,
};

pub const DETAILED: GenerationPreset = GenerationPreset {
    max_length: 230,
    min_length: 60,
    num_beams: 5,
    length_penalty: 0.9,
    early_stopping: true,
};

pub const BULLET_POINTS: GenerationPreset = GenerationPreset {
    max_length: 160,
    min_length: 30,
    num_beams: 4,
    length_penalty: 1.0,
    early_stopping: true,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Style {
    Brief,
    #[default]
    Standard,
    Detailed,
    BulletPoints,
    /// Free-text instruction prepended to the input; uses the standard envelope.
    Custom { instruction: String },
}

impl Style {
    /// Resolves the style named in a request. A missing or blank name means
    /// `standard`. `custom_prompt` is only consulted for the `custom` style.
    ///
    /// # Errors
    ///
    /// Fails on an unknown style name, or on a missing or rejected custom prompt.
    pub fn from_request(
        name: Option<&str>,
        custom_prompt: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let Some(name) = name else {
            return Ok(Style::default());
        };

        match name.to_ascii_lowercase().as_str() {
            "brief" => Ok(Style::Brief),
            "standard" => Ok(Style::Standard),
            "detailed" => Ok(Style::Detailed),
            "bullet_points" => Ok(Style::BulletPoints),
            "custom" => {
                let raw = custom_prompt
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .ok_or(ValidationError::MissingCustomPrompt)?;
                let instruction =
                    sanitize_custom_prompt(raw).map_err(ValidationError::InvalidCustomPrompt)?;
                Ok(Style::Custom { instruction })
            }
            _ => Err(ValidationError::UnknownStyle(name.to_string())),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Style::Brief => "brief",
            Style::Standard => "standard",
            Style::Detailed => "detailed",
            Style::BulletPoints => "bullet_points",
            Style::Custom { .. } => "custom",
        }
    }

    #[must_use]
    pub fn preset(&self) -> GenerationPreset {
        match self {
            Style::Brief => BRIEF,
            Style::Standard | Style::Custom { .. } => STANDARD,
            Style::Detailed => DETAILED,
            Style::BulletPoints => BULLET_POINTS,
        }
    }

    /// Text actually sent as `inputs`.
    #[must_use]
    pub fn model_input(&self, text: &str) -> String {
        match self {
            Style::Custom { instruction } => {
                format!("{instruction}\n\nText to transform:\n{text}")
            }
            _ => text.to_string(),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
