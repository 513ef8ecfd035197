//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the
//! client constructor. Request handling never reads environment variables.
//! The `*_from_env_value` helpers take already-read values so binaries decide
//! where those come from and tests never touch the process environment.

use crate::constants::{DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::{FinderError, FinderResult};
use std::time::Duration;

/// Settings for talking to the alternatives service.
#[derive(Clone)]
pub struct FinderConfig {
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl FinderConfig {
    /// Create a new `FinderConfig`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError::InvalidInput` if the key, model or base URL is
    /// blank, or the timeout is zero.
    pub fn new(
        api_key: String,
        model: String,
        api_base: String,
        timeout: Duration,
    ) -> FinderResult<Self> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(FinderError::InvalidInput("api key cannot be empty".into()));
        }

        let model = model.trim().to_string();
        if model.is_empty() {
            return Err(FinderError::InvalidInput("model cannot be empty".into()));
        }

        let api_base = api_base.trim().trim_end_matches('/').to_string();
        if api_base.is_empty() {
            return Err(FinderError::InvalidInput("api base URL cannot be empty".into()));
        }
        if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
            return Err(FinderError::InvalidInput(
                "api base URL must start with http:// or https://".into(),
            ));
        }

        if timeout.is_zero() {
            return Err(FinderError::InvalidInput("timeout must be positive".into()));
        }

        Ok(Self {
            api_key,
            model,
            api_base,
            timeout,
        })
    }

    /// Configuration with the default model, base URL and timeout.
    pub fn with_defaults(api_key: String) -> FinderResult<Self> {
        Self::new(
            api_key,
            DEFAULT_MODEL.into(),
            DEFAULT_API_BASE.into(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Pick the API key from the primary variable, falling back to the legacy one.
pub fn api_key_from_env_values(
    primary: Option<String>,
    fallback: Option<String>,
) -> FinderResult<String> {
    non_blank(primary).or_else(|| non_blank(fallback)).ok_or_else(|| {
        FinderError::InvalidInput("GEMINI_API_KEY (or API_KEY) must be set".into())
    })
}

/// Parse the model name; `None` or blank means the default model.
pub fn model_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_MODEL.into())
}

/// Parse the API base URL; `None` or blank means the public Gemini endpoint.
pub fn api_base_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_API_BASE.into())
}

/// Parse the request timeout in whole seconds.
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
pub fn timeout_from_env_value(value: Option<String>) -> FinderResult<Duration> {
    let Some(raw) = non_blank(value) else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };

    let secs: u64 = raw.parse().map_err(|_| {
        FinderError::InvalidInput(format!("timeout must be a whole number of seconds: {raw}"))
    })?;
    if secs == 0 {
        return Err(FinderError::InvalidInput("timeout must be positive".into()));
    }

    Ok(Duration::from_secs(secs))
}
