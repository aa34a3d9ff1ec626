//! API key handling.

use crate::{Error, Result};
use std::fmt;

/// Prefix shared by every Unbrowser API key (`ub_live_...`, `ub_test_...`).
pub const API_KEY_PREFIX: &str = "ub_";

/// A validated Unbrowser API key.
///
/// Construction fails with [`Error::Validation`] for an empty key or one that
/// does not start with [`API_KEY_PREFIX`], so a client can never be built
/// around an obviously malformed key.
///
/// ```
/// use unbrowser::ApiKey;
///
/// assert!(ApiKey::new("ub_live_abc123").is_ok());
/// assert!(ApiKey::new("sk_live_abc123").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validates and wraps a raw key.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::Validation("api_key is required".to_string()));
        }
        if !key.starts_with(API_KEY_PREFIX) {
            return Err(Error::Validation(format!(
                "Invalid API key format. Must start with '{}'",
                API_KEY_PREFIX
            )));
        }
        Ok(Self(key))
    }

    /// Returns the raw key.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl TryFrom<&str> for ApiKey {
    type Error = Error;

    fn try_from(key: &str) -> Result<Self> {
        Self::new(key)
    }
}

impl TryFrom<String> for ApiKey {
    type Error = Error;

    fn try_from(key: String) -> Result<Self> {
        Self::new(key)
    }
}

// Keeps the secret out of logs and panic messages.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rest = &self.0[API_KEY_PREFIX.len()..];
        let environment = ["live_", "test_"]
            .into_iter()
            .find(|env| rest.starts_with(*env))
            .unwrap_or("");
        write!(f, "ApiKey({}{}***)", API_KEY_PREFIX, environment)
    }
}
