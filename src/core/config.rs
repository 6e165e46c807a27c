use std::env;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::preprocess::{ValidationLimits, WordBounds};

pub const DEFAULT_MODEL_URL: &str =
    "https://router.huggingface.co/hf-inference/models/facebook/bart-large-cnn";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5174";

/// Local dev servers that are always allowed to call the API.
const DEV_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:3000",
];

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub hf_token: String,
    pub model_url: String,
    pub request_timeout: Duration,
    pub limits: ValidationLimits,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Config with the given credential and endpoint and defaults everywhere else.
    #[must_use]
    pub fn new(hf_token: String, model_url: String) -> Self {
        Self {
            hf_token,
            model_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            limits: ValidationLimits::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// # Errors
    ///
    /// Fails when `HF_TOKEN` is missing, or when any override is malformed or
    /// breaks the rule that file bounds are at least as wide as text bounds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let hf_token = get("HF_TOKEN").ok_or(ConfigError::MissingVar("HF_TOKEN"))?;

        let model_url = get("SUMMARIZER_MODEL_URL").unwrap_or_else(|| DEFAULT_MODEL_URL.to_string());
        let parsed = url::Url::parse(&model_url).map_err(|e| ConfigError::InvalidValue {
            name: "SUMMARIZER_MODEL_URL",
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                name: "SUMMARIZER_MODEL_URL",
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let timeout_secs = parse_number(&get, "SUMMARIZER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "SUMMARIZER_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let defaults = ValidationLimits::default();
        let limits = ValidationLimits {
            text: WordBounds {
                min: parse_number(&get, "TEXT_MIN_WORDS", defaults.text.min)?,
                max: parse_number(&get, "TEXT_MAX_WORDS", defaults.text.max)?,
            },
            file: WordBounds {
                min: parse_number(&get, "FILE_MIN_WORDS", defaults.file.min)?,
                max: parse_number(&get, "FILE_MAX_WORDS", defaults.file.max)?,
            },
        };
        check_limits(&limits)?;

        let max_upload_bytes = parse_number(&get, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        Ok(Self {
            hf_token,
            model_url,
            request_timeout: Duration::from_secs(timeout_secs),
            limits,
            max_upload_bytes,
        })
    }
}

fn parse_number<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn check_limits(limits: &ValidationLimits) -> Result<(), ConfigError> {
    for (name, bounds) in [("TEXT_MIN_WORDS", limits.text), ("FILE_MIN_WORDS", limits.file)] {
        if bounds.min > bounds.max {
            return Err(ConfigError::InvalidValue {
                name,
                reason: format!("minimum {} exceeds maximum {}", bounds.min, bounds.max),
            });
        }
    }
    if limits.file.min < limits.text.min || limits.file.max < limits.text.max {
        return Err(ConfigError::InvalidValue {
            name: "FILE_MIN_WORDS",
            reason: "file bounds must be at least as wide as text bounds".to_string(),
        });
    }
    Ok(())
}

/// Allowed browser origins. Infallible so CORS keeps working when the rest of
/// the configuration is broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    #[must_use]
    pub fn new(frontend_url: &str, extra: &[&str]) -> Self {
        let mut allowed_origins: Vec<String> = Vec::new();
        let candidates = std::iter::once(frontend_url)
            .chain(DEV_ORIGINS)
            .chain(extra.iter().copied());
        for origin in candidates {
            let origin = origin.trim().trim_end_matches('/');
            if !origin.is_empty() && !allowed_origins.iter().any(|o| o == origin) {
                allowed_origins.push(origin.to_string());
            }
        }
        Self { allowed_origins }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let frontend = env::var("FRONTEND_URL").unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string());
        let extra = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
        let extra: Vec<&str> = extra.split(',').collect();
        Self::new(&frontend, &extra)
    }

    #[must_use]
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }

    #[must_use]
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FRONTEND_URL, &[])
    }
}
