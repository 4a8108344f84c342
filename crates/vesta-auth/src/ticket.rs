use crate::ClaimsPrincipal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State attached to an authentication session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationProperties {
    /// Free-form property bag.
    #[serde(default)]
    pub items: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_utc: Option<DateTime<Utc>>,
    /// When set, the stored ticket expires at this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_persistent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_refresh: Option<bool>,
}

impl AuthenticationProperties {
    #[must_use]
    pub fn with_expires_utc(mut self, expires_utc: DateTime<Utc>) -> Self {
        self.expires_utc = Some(expires_utc);
        self
    }

    /// Reads an item from the property bag.
    pub fn item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

/// An authenticated principal plus the session state issued with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationTicket {
    pub principal: ClaimsPrincipal,
    pub properties: AuthenticationProperties,
    pub authentication_scheme: String,
}

impl AuthenticationTicket {
    pub fn new(
        principal: ClaimsPrincipal,
        properties: AuthenticationProperties,
        authentication_scheme: impl Into<String>,
    ) -> Self {
        Self {
            principal,
            properties,
            authentication_scheme: authentication_scheme.into(),
        }
    }
}
