use chrono::Duration;
use jsonwebtoken::Algorithm;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::clock::{expires_at, Clock, SystemClock};
use crate::error::TokenError;
use crate::scope::{
    encode_params, scope_uri, ScopeParams, PRIVILEGE_INCOMING, PRIVILEGE_OUTGOING,
    PRIVILEGE_SUBSCRIBE, SERVICE_CLIENT, SERVICE_STREAM,
};
use crate::signing::sign;
use crate::DEFAULT_TTL_SECS;

const KEY_CLIENT_NAME: &str = "clientName";
const KEY_APP_SID: &str = "appSid";
const KEY_APP_PARAMS: &str = "appParams";

const EVENTS_PATH: &str = "/2010-04-01/Events";

/// Builder for legacy capability tokens used by Twilio Client.
///
/// Permissions are expressed as scope URIs joined into the `scope` claim. The
/// token is always signed with HS256 using the account's auth token.
///
/// # Example
/// ```rust
/// use std::collections::HashMap;
/// use twilio_token::CapabilityToken;
///
/// let token = CapabilityToken::new("ACxxxxxxxx", "auth-token")
///     .allow_client_incoming("alice")
///     .allow_client_outgoing("APxxxxxxxx", HashMap::new())
///     .serialize()
///     .expect("Failed to create token");
/// assert_eq!(token.split('.').count(), 3);
/// ```
#[derive(Clone)]
pub struct CapabilityToken {
    account_sid: String,
    auth_token: String,
    ttl: Duration,
    capabilities: Vec<String>,
    client_name: String,
    outgoing_scope_params: ScopeParams,
    clock: Arc<dyn Clock>,
}

#[derive(Serialize)]
struct CapabilityClaims<'a> {
    scope: String,
    iss: &'a str,
    exp: i64,
}

impl CapabilityToken {
    /// Creates a capability token builder with a one hour TTL and no permissions.
    ///
    /// Empty credentials are accepted here and reported by [`serialize`](Self::serialize).
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
            capabilities: Vec::new(),
            client_name: String::new(),
            outgoing_scope_params: ScopeParams::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Allows incoming connections to the named client.
    ///
    /// The name is also attached to the outgoing scope, if one is staged.
    pub fn allow_client_incoming(mut self, client_name: impl Into<String>) -> Self {
        let client_name = client_name.into();
        let mut params = ScopeParams::new();
        params.set(KEY_CLIENT_NAME, client_name.as_str());
        self.capabilities
            .push(scope_uri(SERVICE_CLIENT, PRIVILEGE_INCOMING, &params));
        self.client_name = client_name;
        self
    }

    /// Allows outgoing connections through the given application.
    ///
    /// The outgoing scope is only rendered at serialize time so that it can
    /// pick up a client name set later.
    ///
    /// # Arguments
    /// * `app_sid` - Application to connect outgoing calls to
    /// * `app_params` - Extra parameters forwarded to the application
    pub fn allow_client_outgoing(
        mut self,
        app_sid: impl Into<String>,
        app_params: HashMap<String, String>,
    ) -> Self {
        self.outgoing_scope_params.set(KEY_APP_SID, app_sid);
        if !app_params.is_empty() {
            self.outgoing_scope_params
                .set(KEY_APP_PARAMS, encode_params(&app_params));
        }
        self
    }

    /// Allows subscribing to the account event stream, optionally filtered.
    pub fn allow_event_stream(mut self, filters: impl Into<String>) -> Self {
        let filters = filters.into();
        let mut params = ScopeParams::new();
        params.set("path", EVENTS_PATH);
        if !filters.is_empty() {
            params.set("params", filters);
        }
        self.capabilities
            .push(scope_uri(SERVICE_STREAM, PRIVILEGE_SUBSCRIBE, &params));
        self
    }

    /// Overrides the default one hour time to live.
    pub fn time_to_live(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Replaces the clock used to compute the expiration.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Scope URIs that [`serialize`](Self::serialize) would place in the token,
    /// including the staged outgoing scope.
    pub fn scopes(&self) -> Vec<String> {
        let mut scopes = self.capabilities.clone();
        if !self.outgoing_scope_params.is_empty() {
            let mut params = self.outgoing_scope_params.clone();
            if !self.client_name.is_empty() {
                params.set(KEY_CLIENT_NAME, self.client_name.as_str());
            }
            scopes.push(scope_uri(SERVICE_CLIENT, PRIVILEGE_OUTGOING, &params));
        }
        scopes
    }

    /// Signs the token with HS256.
    ///
    /// # Errors
    /// * `TokenError::MissingAccountSid` - account sid is empty
    /// * `TokenError::MissingAuthToken` - auth token is empty
    /// * `TokenError::Signing` - the JWT signer failed
    pub fn serialize(&self) -> Result<String, TokenError> {
        self.validate()?;

        let scopes = self.scopes();
        let claims = CapabilityClaims {
            scope: scopes.join(" "),
            iss: &self.account_sid,
            exp: expires_at(self.clock.now(), self.ttl),
        };
        let token = sign(&claims, Some(Algorithm::HS256), None, &self.auth_token)?;

        info!(
            issuer = %self.account_sid,
            scopes = scopes.len(),
            exp = claims.exp,
            "capability token issued"
        );
        Ok(token)
    }

    fn validate(&self) -> Result<(), TokenError> {
        if self.account_sid.is_empty() {
            return Err(TokenError::MissingAccountSid);
        }
        if self.auth_token.is_empty() {
            return Err(TokenError::MissingAuthToken);
        }
        Ok(())
    }
}

impl fmt::Debug for CapabilityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityToken")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .field("capabilities", &self.capabilities)
            .field("client_name", &self.client_name)
            .field("outgoing_scope_params", &self.outgoing_scope_params)
            .finish()
    }
}
