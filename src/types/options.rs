//! Request-side types: browse options, session data and the closed string
//! enumerations shared with the result types.

use super::de;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content format returned by a browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Markdown,
    Text,
    Html,
}

/// Rendering tier, from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Intelligence,
    Lightweight,
    Playwright,
}

impl CostTier {
    /// The wire name of the tier.
    pub fn as_str(self) -> &'static str {
        match self {
            CostTier::Intelligence => "intelligence",
            CostTier::Lightweight => "lightweight",
            CostTier::Playwright => "playwright",
        }
    }
}

/// How much post-browse verification the service performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    #[default]
    Basic,
    Standard,
    Thorough,
}

/// Verification settings for a browse request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOptions {
    pub enabled: bool,
    pub mode: VerificationMode,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: VerificationMode::Basic,
        }
    }
}

/// Options for browse, fetch, batch and preview requests.
///
/// Every field is optional and only set fields are sent, so
/// `BrowseOptions::default()` serializes to `{}` and leaves every choice to
/// the service.
///
/// ```
/// use unbrowser::{BrowseOptions, ContentType, CostTier};
///
/// let options = BrowseOptions {
///     content_type: Some(ContentType::Markdown),
///     max_chars: Some(5000),
///     max_cost_tier: Some(CostTier::Lightweight),
///     ..Default::default()
/// };
///
/// assert_eq!(
///     serde_json::to_value(&options).unwrap(),
///     serde_json::json!({
///         "contentType": "markdown",
///         "maxChars": 5000,
///         "maxCostTier": "lightweight",
///     })
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    /// CSS selector to wait for before extracting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_to_load: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_tables: Option<bool>,
    /// Upper bound on latency; the service picks the tier accordingly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_latency_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cost_tier: Option<CostTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<VerifyOptions>,
}

/// An HTTP cookie, sent with session data and returned as `new_cookies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(
        default = "de::default_cookie_path",
        deserialize_with = "de::cookie_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,
}

impl Cookie {
    /// Creates a cookie with path `/` and no domain.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: de::default_cookie_path(),
        }
    }

    /// Scopes the cookie to a domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Overrides the cookie path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Browser state replayed into an authenticated browse.
///
/// Empty collections are left off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub cookies: Vec<Cookie>,
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub local_storage: BTreeMap<String, String>,
}

impl SessionData {
    /// Returns `true` when neither cookies nor local storage are set.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.local_storage.is_empty()
    }
}
