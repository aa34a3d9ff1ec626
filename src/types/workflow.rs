//! Workflow recording and replay types.

use super::de;
use super::options::CostTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How much a workflow step matters on replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Critical,
    Important,
    Optional,
}

/// A value substituted into a workflow on replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Text(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::Text(value)
    }
}

impl From<i64> for VariableValue {
    fn from(value: i64) -> Self {
        VariableValue::Integer(value)
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        VariableValue::Bool(value)
    }
}

/// Replay variables keyed by name.
pub type Variables = BTreeMap<String, VariableValue>;

/// An active recording session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSession {
    pub recording_id: String,
    pub status: String,
    pub started_at: String,
}

/// A recording that was stopped and saved as a workflow.
///
/// Fields beyond the identifiers vary by server version and are kept in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoppedRecording {
    pub workflow_id: String,
    #[serde(default)]
    pub skill_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Acknowledgement of a step annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAnnotation {
    pub recording_id: String,
    pub step_number: u32,
    pub annotated: bool,
}

/// Summary of a saved workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub domain: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub tags: Vec<String>,
    /// Number of steps.
    pub steps: u32,
    pub version: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub usage_count: u64,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub success_rate: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowList {
    pub workflows: Vec<WorkflowInfo>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub step_number: u32,
    pub action: String,
    pub description: String,
    pub importance: Importance,
    pub success: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub user_annotation: Option<String>,
    #[serde(default)]
    pub tier: Option<CostTier>,
    /// Duration in milliseconds.
    #[serde(default)]
    pub duration: Option<u64>,
}

/// A saved workflow with its full step list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDetails {
    pub id: String,
    pub name: String,
    pub description: String,
    pub domain: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub tags: Vec<String>,
    pub version: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub usage_count: u64,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub success_rate: f64,
    pub steps: Vec<WorkflowStep>,
    #[serde(default)]
    pub skill_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl WorkflowDetails {
    /// Steps marked [`Importance::Critical`].
    pub fn critical_steps(&self) -> impl Iterator<Item = &WorkflowStep> {
        self.steps
            .iter()
            .filter(|step| step.importance == Importance::Critical)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStepResult {
    pub step_number: u32,
    pub success: bool,
    /// Duration in milliseconds.
    pub duration: u64,
    #[serde(default)]
    pub tier: Option<CostTier>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of replaying a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayResult {
    pub workflow_id: String,
    pub overall_success: bool,
    /// Total duration in milliseconds.
    pub total_duration: u64,
    pub results: Vec<ReplayStepResult>,
}

impl ReplayResult {
    /// The first step that failed, if any.
    pub fn first_failure(&self) -> Option<&ReplayStepResult> {
        self.results.iter().find(|step| !step.success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedWorkflow {
    pub workflow_id: String,
    pub deleted: bool,
}
