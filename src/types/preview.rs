//! Browse previews: the plan the service would follow, without running it.

use super::de;
use super::options::CostTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceRating {
    High,
    Medium,
    Low,
}

/// How well the service knows a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainFamiliarity {
    High,
    Medium,
    Low,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    pub order: u32,
    pub action: String,
    pub description: String,
    pub tier: CostTier,
    /// Expected duration in milliseconds.
    pub expected_duration: u64,
    pub confidence: ConfidenceRating,
    #[serde(default)]
    pub reason: Option<String>,
}

/// An ordered list of steps, optionally backed by a fallback plan that is
/// itself a full plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    pub steps: Vec<ExecutionStep>,
    pub tier: CostTier,
    pub reasoning: String,
    #[serde(default)]
    pub fallback_plan: Option<Box<ExecutionPlan>>,
}

impl ExecutionPlan {
    /// Iterates the fallback chain, nearest fallback first.
    pub fn fallbacks(&self) -> impl Iterator<Item = &ExecutionPlan> {
        std::iter::successors(self.fallback_plan.as_deref(), |&plan| {
            plan.fallback_plan.as_deref()
        })
    }

    /// Sum of the expected step durations, in milliseconds.
    pub fn expected_duration(&self) -> u64 {
        self.steps.iter().map(|step| step.expected_duration).sum()
    }
}

/// Time estimate in milliseconds, with a per-tier breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub min: u64,
    pub max: u64,
    pub expected: u64,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub breakdown: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceFactors {
    pub has_learned_patterns: bool,
    pub domain_familiarity: DomainFamiliarity,
    pub api_discovered: bool,
    pub requires_auth: bool,
    pub bot_detection_likely: bool,
    pub skills_available: bool,
    pub pattern_count: u32,
    pub pattern_success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceLevel {
    pub overall: ConfidenceRating,
    pub factors: ConfidenceFactors,
}

/// What browsing a URL would do, how long it would take and how confident
/// the service is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowsePreview {
    pub schema_version: String,
    pub plan: ExecutionPlan,
    pub estimated_time: TimeEstimate,
    pub confidence: ConfidenceLevel,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub alternative_plans: Vec<ExecutionPlan>,
}
