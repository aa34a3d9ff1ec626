//! Per-domain learned patterns.

use super::de;
use serde::{Deserialize, Serialize};

/// What the service has learned about a domain.
///
/// Counters default to zero and `recommended_wait_strategy` to `"load"` when
/// the service has nothing on record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainIntelligence {
    pub domain: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub known_patterns: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub selector_chains: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub validators: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub pagination_patterns: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub recent_failures: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub success_rate: f64,
    #[serde(default)]
    pub domain_group: Option<String>,
    #[serde(
        default = "de::default_wait_strategy",
        deserialize_with = "de::wait_strategy"
    )]
    pub recommended_wait_strategy: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub should_use_session: bool,
}
