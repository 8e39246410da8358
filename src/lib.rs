//! debtgauge - technical debt cost estimation from real hosting data
//!
//! Estimates the engineering cost of technical-debt items by combining
//! *measured* signals from a project-hosting API (commit activity,
//! review latency, tracked bug-fix time, pipeline failures) with
//! *configurable* cost assumptions (hourly rate, CI compute cost, carbon
//! intensity), and deduplicates raw findings into stable,
//! identity-preserving debt items.
//!
//! The host API transport is an external collaborator behind the
//! [`api::HostApi`] trait; everything here is transport-agnostic.

pub mod api;
pub mod config;
pub mod correlate;
pub mod cost;
pub mod error;
pub mod fingerprint;
pub mod paginate;
pub mod ratelimit;
mod rounding;
pub mod stats;

pub use api::{
    Commit, HostApi, Issue, Job, MergeRequest, MergeRequestState, Pipeline, PipelineStatus,
    ProjectInfo, TimeStats,
};
pub use config::AssumptionsConfig;
pub use correlate::{CodeQualitySummary, CorrelationEngine, TrackedIssue};
pub use cost::{
    annual_velocity_cost, carbon_footprint, estimate_fix_effort, roi, time_savings_only,
    CarbonReport, RoiReport, TimeSavingsReport, VelocityCostReport,
};
pub use error::{ApiError, ApiResult, ConfigError};
pub use fingerprint::{deduplicate, fingerprint, Finding};
pub use ratelimit::RateLimiter;
pub use stats::{pipeline_stats, review_time_minutes, PipelineStats};
