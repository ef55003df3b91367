use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer token issued by the service.
///
/// `Debug` never prints the token value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty or whitespace-only token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Who the stored credential belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
}

impl Identity {
    /// Identity derived from the login name when the service returns none.
    pub fn from_login(login: &str) -> Self {
        let username = login.split('@').next().unwrap_or(login).to_string();
        Self {
            email: login.to_string(),
            username,
        }
    }
}

/// Persisted session: the credential plus an optional identity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: Credential,
    #[serde(default)]
    pub identity: Option<Identity>,
}
