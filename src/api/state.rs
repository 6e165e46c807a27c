use tracing::{error, info};

use crate::ai::{InferenceClient, RemoteModel, Summarizer};
use crate::core::config::{AppConfig, CorsPolicy};
use crate::errors::ConfigError;

/// Everything needed to run a summarization.
pub struct Backend<M> {
    pub config: AppConfig,
    pub summarizer: Summarizer<M>,
}

/// Shared, immutable state built once per Lambda container.
///
/// A broken configuration does not stop the process: health reports it and the
/// summarization routes answer 503 until the deployment is fixed.
pub struct AppState<M> {
    pub cors: CorsPolicy,
    pub backend: Result<Backend<M>, ConfigError>,
}

impl<M: RemoteModel> AppState<M> {
    #[must_use]
    pub fn new(cors: CorsPolicy, config: AppConfig, model: M) -> Self {
        let summarizer = Summarizer::new(model, config.request_timeout);
        Self {
            cors,
            backend: Ok(Backend { config, summarizer }),
        }
    }

    #[must_use]
    pub fn unconfigured(cors: CorsPolicy, error: ConfigError) -> Self {
        Self {
            cors,
            backend: Err(error),
        }
    }

    /// The working backend, or the configuration problem that prevents it.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] captured at startup.
    pub fn backend(&self) -> Result<&Backend<M>, ConfigError> {
        self.backend.as_ref().map_err(Clone::clone)
    }
}

impl AppState<InferenceClient> {
    /// Reads the environment and builds the real inference client.
    #[must_use]
    pub fn from_env() -> Self {
        let cors = CorsPolicy::from_env();
        let built = AppConfig::from_env().and_then(|config| {
            let client = InferenceClient::new(
                config.model_url.clone(),
                config.hf_token.clone(),
                config.request_timeout,
            )
            .map_err(|e| ConfigError::InvalidValue {
                name: "SUMMARIZER_MODEL_URL",
                reason: e.to_string(),
            })?;
            Ok((config, client))
        });

        match built {
            Ok((config, client)) => {
                info!(
                    model_url = %config.model_url,
                    timeout_secs = config.request_timeout.as_secs(),
                    "Summarizer configured"
                );
                Self::new(cors, config, client)
            }
            Err(e) => {
                error!("Config error: {}", e);
                Self::unconfigured(cors, e)
            }
        }
    }
}
