//! # Twilio Config
//!
//! Credential configuration for the Twilio token SDK.
//!
//! A [`TwilioConfig`] holds the account SID plus the secrets used to sign
//! tokens: the account auth token for capability tokens, and an API key
//! (SID and secret) for access tokens. It can be built in code, read from a
//! JSON or TOML file, or loaded from environment variables.
//!
//! ## Environment variables
//!
//! With `from_env("TWILIO")` the following variables are read:
//!
//! ```text
//! TWILIO_ACCOUNT_SID     - Account SID (required)
//! TWILIO_AUTH_TOKEN      - Account auth token
//! TWILIO_API_KEY_SID     - API key SID
//! TWILIO_API_KEY_SECRET  - API key secret
//! TWILIO_TTL_SECS        - Default token TTL in seconds
//! ```
//!
//! `from_env_or_file` additionally accepts `TWILIO_AUTH_TOKEN_FILE` and
//! `TWILIO_API_KEY_SECRET_FILE` pointing at files holding the secret.

mod error;

pub use error::ConfigError;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Credentials and defaults used to mint tokens.
///
/// # Examples
///
/// ```
/// use twilio_config::TwilioConfig;
///
/// let config = TwilioConfig::builder()
///     .account_sid("ACxxxxxxxx")
///     .auth_token("auth-token")
///     .api_key("SKxxxxxxxx", "api-key-secret")
///     .ttl_secs(600)
///     .build()
///     .expect("Failed to build configuration");
///
/// assert_eq!(config.ttl().map(|ttl| ttl.num_seconds()), Some(600));
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TwilioConfig {
    pub account_sid: String,
    /// Account auth token, signs capability tokens
    #[serde(default)]
    pub auth_token: Option<String>,
    /// API key SID, the issuer of access tokens
    #[serde(default)]
    pub api_key_sid: Option<String>,
    /// API key secret, signs access tokens
    #[serde(default)]
    pub api_key_secret: Option<String>,
    /// Default time to live for issued tokens, in seconds
    #[serde(default)]
    pub ttl_secs: Option<i64>,
}

/// Builder for TwilioConfig
#[derive(Default)]
pub struct TwilioConfigBuilder {
    account_sid: Option<String>,
    auth_token: Option<String>,
    api_key_sid: Option<String>,
    api_key_secret: Option<String>,
    ttl_secs: Option<i64>,
}

impl TwilioConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder from an existing TwilioConfig
    pub fn from_config(config: &TwilioConfig) -> Self {
        Self {
            account_sid: Some(config.account_sid.clone()),
            auth_token: config.auth_token.clone(),
            api_key_sid: config.api_key_sid.clone(),
            api_key_secret: config.api_key_secret.clone(),
            ttl_secs: config.ttl_secs,
        }
    }

    pub fn account_sid(mut self, account_sid: impl Into<String>) -> Self {
        self.account_sid = Some(account_sid.into());
        self
    }

    pub fn auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Set the API key used to issue access tokens
    ///
    /// # Arguments
    ///
    /// * `sid` - The API key SID
    /// * `secret` - The API key secret
    pub fn api_key(mut self, sid: impl Into<String>, secret: impl Into<String>) -> Self {
        self.api_key_sid = Some(sid.into());
        self.api_key_secret = Some(secret.into());
        self
    }

    pub fn ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = Some(ttl_secs);
        self
    }

    /// Build the TwilioConfig
    ///
    /// # Errors
    ///
    /// Returns an error if the account SID is missing or the resulting
    /// configuration fails [`TwilioConfig::validate`].
    pub fn build(self) -> Result<TwilioConfig, ConfigError> {
        let config = TwilioConfig {
            account_sid: self.account_sid.ok_or(ConfigError::MissingAccountSid)?,
            auth_token: self.auth_token,
            api_key_sid: self.api_key_sid,
            api_key_secret: self.api_key_secret,
            ttl_secs: self.ttl_secs,
        };

        config.validate()?;

        Ok(config)
    }
}

impl TwilioConfig {
    /// Create a configuration with only an account SID
    ///
    /// Credentials still have to be filled in before it validates.
    pub fn new(account_sid: impl Into<String>) -> Self {
        TwilioConfig {
            account_sid: account_sid.into(),
            auth_token: None,
            api_key_sid: None,
            api_key_secret: None,
            ttl_secs: None,
        }
    }

    pub fn builder() -> TwilioConfigBuilder {
        TwilioConfigBuilder::new()
    }

    /// Convert this configuration to a builder for modification
    pub fn to_builder(&self) -> TwilioConfigBuilder {
        TwilioConfigBuilder::from_config(self)
    }

    /// Check that the configuration can issue at least one kind of token
    ///
    /// # Errors
    ///
    /// * `MissingAccountSid` - the account SID is empty
    /// * `IncompleteApiKey` - only one half of the API key is set
    /// * `MissingCredentials` - neither an auth token nor an API key is set
    /// * `InvalidTtl` - the TTL is zero, negative, or out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_sid.is_empty() {
            return Err(ConfigError::MissingAccountSid);
        }

        let key_sid = non_empty(&self.api_key_sid);
        let key_secret = non_empty(&self.api_key_secret);
        if key_sid.is_some() != key_secret.is_some() {
            return Err(ConfigError::IncompleteApiKey);
        }

        if non_empty(&self.auth_token).is_none() && key_sid.is_none() {
            return Err(ConfigError::MissingCredentials);
        }

        if let Some(ttl_secs) = self.ttl_secs {
            if ttl_secs <= 0 || Duration::try_seconds(ttl_secs).is_none() {
                return Err(ConfigError::InvalidTtl(ttl_secs.to_string()));
            }
        }

        Ok(())
    }

    /// The configured default TTL, if any
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.and_then(Duration::try_seconds)
    }

    /// Auth token, if set and non-empty
    pub fn auth_token(&self) -> Option<&str> {
        non_empty(&self.auth_token)
    }

    /// API key SID and secret, if both are set and non-empty
    pub fn api_key(&self) -> Option<(&str, &str)> {
        non_empty(&self.api_key_sid).zip(non_empty(&self.api_key_secret))
    }

    /// Create a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_content = fs::read_to_string(path)?;
        let config: TwilioConfig = serde_json::from_str(&file_content)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded configuration from JSON file");
        Ok(config)
    }

    /// Create a configuration from a TOML file
    #[cfg(feature = "toml")]
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_content = fs::read_to_string(path)?;
        let config: TwilioConfig = toml::from_str(&file_content)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded configuration from TOML file");
        Ok(config)
    }

    /// Create a configuration from environment variables
    ///
    /// The variables are named with the given prefix followed by:
    /// - ACCOUNT_SID (required)
    /// - AUTH_TOKEN
    /// - API_KEY_SID
    /// - API_KEY_SECRET
    /// - TTL_SECS
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the account SID is missing, the TTL is not
    /// a number, or the result fails validation.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let config = TwilioConfig {
            account_sid: required_var(&format!("{}_ACCOUNT_SID", prefix))?,
            auth_token: optional_var(&format!("{}_AUTH_TOKEN", prefix))?,
            api_key_sid: optional_var(&format!("{}_API_KEY_SID", prefix))?,
            api_key_secret: optional_var(&format!("{}_API_KEY_SECRET", prefix))?,
            ttl_secs: ttl_var(&format!("{}_TTL_SECS", prefix))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create a configuration from environment variables or files
    ///
    /// Like `from_env`, but the secrets may instead be given as
    /// `{PREFIX}_AUTH_TOKEN_FILE` and `{PREFIX}_API_KEY_SECRET_FILE`, naming a
    /// file whose trimmed contents is the secret. The `_FILE` variable wins
    /// when both are set.
    pub fn from_env_or_file(prefix: &str) -> Result<Self, ConfigError> {
        let config = TwilioConfig {
            account_sid: required_var(&format!("{}_ACCOUNT_SID", prefix))?,
            auth_token: var_or_file(&format!("{}_AUTH_TOKEN", prefix))?,
            api_key_sid: optional_var(&format!("{}_API_KEY_SID", prefix))?,
            api_key_secret: var_or_file(&format!("{}_API_KEY_SECRET", prefix))?,
            ttl_secs: ttl_var(&format!("{}_TTL_SECS", prefix))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Path of the per-user configuration file, `<config dir>/twilio/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        Ok(dir.join("twilio").join("config.toml"))
    }

    /// Load the per-user configuration file
    #[cfg(feature = "toml")]
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_toml(Self::default_config_path()?)
    }
}

impl fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_sid", &self.api_key_sid)
            .field(
                "api_key_secret",
                &self.api_key_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => {
            Err(ConfigError::EnvVarError(format!("{} is not set", name)))
        }
        Err(e) => Err(e.into()),
    }
}

fn optional_var(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn var_or_file(name: &str) -> Result<Option<String>, ConfigError> {
    match optional_var(&format!("{}_FILE", name))? {
        Some(path) => {
            let content = fs::read_to_string(&path).map_err(|e| {
                ConfigError::IOError(format!("Failed to read {}: {}", path, e))
            })?;
            Ok(Some(content.trim().to_string()))
        }
        None => optional_var(name),
    }
}

fn ttl_var(name: &str) -> Result<Option<i64>, ConfigError> {
    optional_var(name)?
        .map(|value| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidTtl(value.clone()))
        })
        .transpose()
}
