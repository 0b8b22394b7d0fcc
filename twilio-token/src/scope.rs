//! Scope URIs for capability tokens.
//!
//! A scope has the form `scope:<service>:<privilege>?<query>`. The query is
//! encoded deterministically: keys sorted bytewise, values kept in insertion
//! order, and every key and value query-escaped. Consumers compare scope
//! strings verbatim, so the encoding here must not drift.

use std::collections::{BTreeMap, HashMap};

pub const SERVICE_CLIENT: &str = "client";
pub const SERVICE_STREAM: &str = "stream";

pub const PRIVILEGE_INCOMING: &str = "incoming";
pub const PRIVILEGE_OUTGOING: &str = "outgoing";
pub const PRIVILEGE_SUBSCRIBE: &str = "subscribe";

/// Query parameters attached to a scope URI.
///
/// Keys are unique and kept sorted; each key may hold several values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeParams {
    values: BTreeMap<String, Vec<String>>,
}

impl ScopeParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), vec![value.into()]);
    }

    /// Append `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// First value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encode as `k1=v1&k1=v2&k2=v3`, sorted by key.
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();
        for (key, values) in &self.values {
            let key = query_escape(key);
            for value in values {
                pairs.push(format!("{}={}", key, query_escape(value)));
            }
        }
        pairs.join("&")
    }
}

/// Build `scope:<service>:<privilege>`, followed by `?<query>` when there are
/// parameters.
pub fn scope_uri(service: &str, privilege: &str, params: &ScopeParams) -> String {
    let query = params.encode();
    if query.is_empty() {
        format!("scope:{}:{}", service, privilege)
    } else {
        format!("scope:{}:{}?{}", service, privilege, query)
    }
}

/// Encode a plain string map as a query string (used for `appParams`).
pub fn encode_params(params: &HashMap<String, String>) -> String {
    let mut query = ScopeParams::new();
    for (key, value) in params {
        query.add(key.as_str(), value.as_str());
    }
    query.encode()
}

/// Escape a query component.
///
/// `A-Z a-z 0-9 - _ . ~` pass through, a space becomes `+`, and every other
/// byte is written as `%XX`. A literal `%` is always escaped, so the only
/// `%20` sequences in the output come from spaces.
pub fn query_escape(component: &str) -> String {
    urlencoding::encode(component).replace("%20", "+")
}
