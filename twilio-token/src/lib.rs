//! # Twilio Token
//!
//! Builders for the short-lived tokens Twilio client SDKs authenticate with.
//!
//! Two token kinds are supported:
//!
//! - **Capability tokens** (legacy): a space separated list of scope URIs in a
//!   `scope` claim, signed with the account auth token.
//! - **Access tokens**: an identity plus named grants in a `grants` claim,
//!   signed with an API key secret.
//!
//! Both builders validate their inputs only when serialized; configuration
//! calls never fail. Token verification is out of scope for this crate.
//!
//! ## Usage
//!
//! ```no_run
//! use twilio_token::{AccessToken, MessagingGrant, TokenError};
//!
//! fn main() -> Result<(), TokenError> {
//!     let token = AccessToken::new("ACxxxxxxxx", "SKxxxxxxxx", "api-key-secret")
//!         .identity("alice")
//!         .add_grant(MessagingGrant::new("ISxxxxxxxx", "", "", ""))
//!         .serialize()?;
//!
//!     println!("{}", token);
//!     Ok(())
//! }
//! ```

mod access;
mod capability;
mod clock;
mod error;
mod grant;
mod scope;
mod signing;

pub use access::{AccessToken, TOKEN_CONTENT_TYPE};
pub use capability::CapabilityToken;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::TokenError;
pub use grant::{ConversationGrant, Grant, MessagingGrant};
pub use scope::{encode_params, query_escape, scope_uri, ScopeParams};
pub use signing::{is_supported_algorithm, SUPPORTED_ALGORITHMS};

// Re-export jsonwebtoken types that are needed for public API
pub use jsonwebtoken::Algorithm;

/// Default token time to live: one hour.
pub const DEFAULT_TTL_SECS: i64 = 3600;
