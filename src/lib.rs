//! # Twilio Auth
//!
//! Mint the short-lived tokens Twilio client SDKs use to authenticate,
//! without shipping the account's long-lived secrets to clients.
//!
//! This crate combines functionality from:
//! - `twilio-token`: Capability and access token builders
//! - `twilio-config`: Credential configuration
//!
//! ## Feature Flags
//!
//! - `toml`: Enables configuration loading from TOML files (on by default)
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use twilio_auth::{TokenIssuer, TwilioConfig};
//!
//! # fn main() -> Result<(), twilio_auth::SdkError> {
//! let config = TwilioConfig::builder()
//!     .account_sid("ACxxxxxxxx")
//!     .auth_token("auth-token")
//!     .build()?;
//!
//! let token = TokenIssuer::new(config)
//!     .capability_token()?
//!     .allow_client_incoming("alice")
//!     .allow_client_outgoing("APxxxxxxxx", HashMap::new())
//!     .serialize()?;
//! # Ok(())
//! # }
//! ```

mod issuer;

use thiserror::Error;

pub use issuer::TokenIssuer;

// Re-export everything from the component crates
pub use twilio_token::{
    encode_params, is_supported_algorithm, query_escape, scope_uri, AccessToken, Algorithm,
    CapabilityToken, Clock, ConversationGrant, FixedClock, Grant, MessagingGrant, ScopeParams,
    SystemClock, TokenError, DEFAULT_TTL_SECS, SUPPORTED_ALGORITHMS, TOKEN_CONTENT_TYPE,
};

pub use twilio_config::{ConfigError, TwilioConfig, TwilioConfigBuilder};

/// Errors that can occur in the Twilio auth SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Token error
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}
