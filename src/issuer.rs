use std::sync::Arc;
use tracing::debug;

use crate::SdkError;
use twilio_config::{ConfigError, TwilioConfig};
use twilio_token::{AccessToken, CapabilityToken, Clock, SystemClock};

/// Hands out token builders pre-filled from a [`TwilioConfig`].
///
/// The builders are ordinary [`CapabilityToken`]s and [`AccessToken`]s, so
/// permissions, grants and TTL can still be adjusted before serializing.
///
/// # Example
/// ```rust
/// use twilio_auth::{ConversationGrant, TokenIssuer, TwilioConfig};
///
/// # fn main() -> Result<(), twilio_auth::SdkError> {
/// let config = TwilioConfig::builder()
///     .account_sid("ACxxxxxxxx")
///     .api_key("SKxxxxxxxx", "api-key-secret")
///     .build()?;
///
/// let token = TokenIssuer::new(config)
///     .access_token("alice")?
///     .add_grant(ConversationGrant::new("VSxxxxxxxx"))
///     .serialize()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TokenIssuer {
    config: TwilioConfig,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Create an issuer from `{PREFIX}_*` environment variables, see
    /// [`TwilioConfig::from_env_or_file`].
    pub fn from_env(prefix: &str) -> Result<Self, SdkError> {
        Ok(Self::new(TwilioConfig::from_env_or_file(prefix)?))
    }

    /// Replace the clock handed to every builder this issuer creates.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    fn shared_clock(&self) -> impl Clock + 'static {
        let clock = self.clock.clone();
        move || clock.now()
    }

    pub fn config(&self) -> &TwilioConfig {
        &self.config
    }

    /// A capability token builder signed with the account auth token.
    ///
    /// # Errors
    /// `ConfigError::MissingCredentials` if no auth token is configured.
    pub fn capability_token(&self) -> Result<CapabilityToken, SdkError> {
        let auth_token = self
            .config
            .auth_token()
            .ok_or(ConfigError::MissingCredentials)?;

        let mut token = CapabilityToken::new(self.config.account_sid.as_str(), auth_token)
            .clock(self.shared_clock());
        if let Some(ttl) = self.config.ttl() {
            token = token.time_to_live(ttl);
        }
        debug!(account_sid = %self.config.account_sid, "capability token builder created");
        Ok(token)
    }

    /// An access token builder for `identity`, signed with the API key.
    ///
    /// # Errors
    /// `ConfigError::MissingCredentials` if no API key is configured.
    pub fn access_token(&self, identity: impl Into<String>) -> Result<AccessToken, SdkError> {
        let (key_sid, key_secret) = self
            .config
            .api_key()
            .ok_or(ConfigError::MissingCredentials)?;

        let mut token = AccessToken::new(self.config.account_sid.as_str(), key_sid, key_secret)
            .identity(identity)
            .clock(self.shared_clock());
        if let Some(ttl) = self.config.ttl() {
            token = token.time_to_live(ttl);
        }
        debug!(account_sid = %self.config.account_sid, key_sid, "access token builder created");
        Ok(token)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("config", &self.config)
            .finish()
    }
}

