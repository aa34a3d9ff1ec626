//! Account level results: usage and service health.

use super::de;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Usage for the current billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub period: UsagePeriod,
    pub requests: UsageRequests,
    pub limits: UsageLimits,
}

/// Billing period bounds as RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsagePeriod {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRequests {
    pub total: u64,
    /// Request counts keyed by tier name.
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub by_tier: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLimits {
    pub daily: u64,
    pub remaining: u64,
}

/// Body of `GET /health`. Not wrapped in an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    /// Seconds since the service started.
    pub uptime: f64,
}

impl HealthStatus {
    /// Returns `true` when the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "healthy" | "ok")
    }
}
