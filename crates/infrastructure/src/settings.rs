//! Endpoint settings loaded from `authprobe.toml` and the environment.
//!
//! Sources, lowest precedence first:
//! 1. `authprobe.toml` in the working directory (optional)
//! 2. `BASE_URL`, `LOGIN_URL`, `REQUEST_TIMEOUT_MS`
//! 3. the same keys prefixed with `AUTHPROBE_`

use std::path::Path;
use std::time::Duration;

use authprobe_application::UPDATE_PASSWORD_PATH;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Settings file looked up by [`ApiSettings::load`].
pub const SETTINGS_FILE: &str = "authprobe.toml";

/// Prefix of the namespaced environment variables.
pub const ENV_PREFIX: &str = "AUTHPROBE";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// `base_url` was not provided.
    #[error("base_url is not set (set BASE_URL or base_url in {SETTINGS_FILE})")]
    MissingBaseUrl,

    /// `login_url` was not provided but the login endpoint is exercised.
    #[error("login_url is not set (set LOGIN_URL or login_url in {SETTINGS_FILE})")]
    MissingLoginUrl,

    /// A configured URL does not parse.
    #[error("{key} is not a valid URL: {message}")]
    InvalidUrl {
        /// Settings key.
        key: &'static str,
        /// Parser message.
        message: String,
    },

    /// The timeout is zero.
    #[error("request_timeout_ms must be greater than zero")]
    InvalidTimeout,
}

/// Where the endpoints live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the API; the password update endpoint hangs off it.
    #[serde(default)]
    pub base_url: String,
    /// Full URL of the login endpoint.
    #[serde(default)]
    pub login_url: Option<String>,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ApiSettings {
    /// Loads settings from [`SETTINGS_FILE`] and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or the result is invalid.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(Some(Path::new(SETTINGS_FILE)), None)
    }

    /// Loads settings from an optional file and an environment map. `None`
    /// for `env` reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or the result is invalid.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings: Self = builder
            .add_source(Environment::default().source(env.clone()).try_parsing(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .source(env)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.normalized().validate()
    }

    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim().to_string();
        self.login_url = self
            .login_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }

    /// Checks that the URLs parse and the timeout is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting.
    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.base_url.is_empty() {
            return Err(SettingsError::MissingBaseUrl);
        }
        check_url("base_url", &self.base_url)?;
        if let Some(login_url) = &self.login_url {
            check_url("login_url", login_url)?;
        }
        if self.request_timeout_ms == 0 {
            return Err(SettingsError::InvalidTimeout);
        }
        Ok(self)
    }

    /// URL of the password update endpoint.
    #[must_use]
    pub fn update_password_url(&self) -> String {
        format!("{}{UPDATE_PASSWORD_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// URL of the login endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingLoginUrl`] when it is not configured.
    pub fn require_login_url(&self) -> Result<&str, SettingsError> {
        self.login_url.as_deref().ok_or(SettingsError::MissingLoginUrl)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), SettingsError> {
    let url = Url::parse(value).map_err(|e| SettingsError::InvalidUrl {
        key,
        message: e.to_string(),
    })?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(())
    } else {
        Err(SettingsError::InvalidUrl {
            key,
            message: format!("unsupported scheme '{}'", url.scheme()),
        })
    }
}
