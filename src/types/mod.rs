//! Typed request options and response payloads.
//!
//! Field names follow Rust conventions; serde maps them to the camelCase
//! names used on the wire. Enumerations are closed: an unknown value in a
//! response is a parse failure rather than a silently accepted string.

mod account;
mod browse;
pub(crate) mod de;
mod intelligence;
mod options;
mod preview;
pub(crate) mod requests;
mod workflow;

pub use account::{HealthStatus, Usage, UsageLimits, UsagePeriod, UsageRequests};
pub use browse::{
    BatchItemError, BatchResult, BatchResultItem, BrowseMetadata, BrowseResult, ContentResult,
    DiscoveredApi, TableData, VerificationResult,
};
pub use intelligence::DomainIntelligence;
pub use options::{
    BrowseOptions, ContentType, Cookie, CostTier, SessionData, VerificationMode, VerifyOptions,
};
pub use preview::{
    BrowsePreview, ConfidenceFactors, ConfidenceLevel, ConfidenceRating, DomainFamiliarity,
    ExecutionPlan, ExecutionStep, TimeEstimate,
};
pub use workflow::{
    DeletedWorkflow, Importance, RecordingSession, ReplayResult, ReplayStepResult, StepAnnotation,
    StoppedRecording, VariableValue, Variables, WorkflowDetails, WorkflowInfo, WorkflowList,
    WorkflowStep,
};
