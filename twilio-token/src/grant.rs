//! Permission grants bundled into an access token.
//!
//! Each grant contributes one entry to the token's `grants` claim, keyed by
//! [`Grant::key`]. Any type implementing [`Grant`] can be added to an
//! [`AccessToken`](crate::AccessToken); the builder never inspects grants
//! beyond these two methods.

use serde_json::{Map, Value};
use std::fmt;

/// A named permission payload.
pub trait Grant: fmt::Debug + Send + Sync {
    /// Key of this grant inside the `grants` claim.
    fn key(&self) -> &str;

    /// JSON object stored under [`key`](Grant::key).
    fn payload(&self) -> Value;
}

/// Grant for the video conversation service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationGrant {
    pub configuration_profile_sid: String,
}

impl ConversationGrant {
    pub fn new(configuration_profile_sid: impl Into<String>) -> Self {
        Self {
            configuration_profile_sid: configuration_profile_sid.into(),
        }
    }
}

impl Grant for ConversationGrant {
    fn key(&self) -> &str {
        "rtc"
    }

    fn payload(&self) -> Value {
        let mut payload = Map::new();
        insert_non_empty(
            &mut payload,
            "configuration_profile_sid",
            &self.configuration_profile_sid,
        );
        Value::Object(payload)
    }
}

/// Grant for the IP messaging service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagingGrant {
    pub service_sid: String,
    pub endpoint_id: String,
    pub deployment_role_sid: String,
    pub push_credential_sid: String,
}

impl MessagingGrant {
    pub fn new(
        service_sid: impl Into<String>,
        endpoint_id: impl Into<String>,
        deployment_role_sid: impl Into<String>,
        push_credential_sid: impl Into<String>,
    ) -> Self {
        Self {
            service_sid: service_sid.into(),
            endpoint_id: endpoint_id.into(),
            deployment_role_sid: deployment_role_sid.into(),
            push_credential_sid: push_credential_sid.into(),
        }
    }
}

impl Grant for MessagingGrant {
    fn key(&self) -> &str {
        "ip_messaging"
    }

    fn payload(&self) -> Value {
        let mut payload = Map::new();
        insert_non_empty(&mut payload, "service_sid", &self.service_sid);
        insert_non_empty(&mut payload, "endpoint_id", &self.endpoint_id);
        insert_non_empty(&mut payload, "deployment_role_sid", &self.deployment_role_sid);
        insert_non_empty(&mut payload, "push_credential_sid", &self.push_credential_sid);
        Value::Object(payload)
    }
}

// Empty fields are left out of the payload entirely.
fn insert_non_empty(payload: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.is_empty() {
        payload.insert(key.to_string(), Value::String(value.to_string()));
    }
}
