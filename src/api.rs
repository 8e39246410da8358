//! Host API Capability
//!
//! Typed records and the capability trait for the remote project-hosting
//! API. The transport itself (HTTP client, authentication, retries) is an
//! external collaborator: implementations of [`HostApi`] are expected to
//! wrap a real client and return these records, while everything in this
//! crate stays transport-agnostic and mockable.
//!
//! All timestamps cross this boundary as ISO-8601 strings, potentially
//! carrying a "Z" UTC suffix. They are parsed (and malformation handled)
//! at the point of use, not at the boundary, because a single bad
//! timestamp must only invalidate the one metric derived from it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

/// A commit touching a queried file path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Content hash assigned by the host system
    pub id: String,
    /// ISO-8601 authoring timestamp
    pub created_at: String,
}

/// Merge request state as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    Merged,
    Opened,
    Closed,
    Locked,
    /// Any state this client does not recognise
    #[serde(other)]
    Other,
}

/// A merge request, identified by its iid within a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub iid: u64,
    pub state: MergeRequestState,
    /// ISO-8601 creation timestamp
    pub created_at: String,
    /// ISO-8601 merge timestamp; `None` while the MR is open
    pub merged_at: Option<String>,
    /// Pipeline attached to the MR head, when the host reports one
    #[serde(default)]
    pub head_pipeline_id: Option<u64>,
}

/// Pipeline status as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Success,
    Failed,
    Canceled,
    Running,
    Pending,
    /// Any status this client does not recognise
    #[serde(other)]
    Other,
}

/// A CI pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: u64,
    pub status: PipelineStatus,
    /// Wall-clock duration in seconds; `None` when the host has not
    /// recorded one (e.g. still running, or never started)
    #[serde(default)]
    pub duration: Option<u64>,
}

/// Time-tracking statistics attached to an issue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeStats {
    /// Total tracked time in seconds
    #[serde(default)]
    pub total_time_spent: u64,
}

/// An issue, as returned by a label/search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub iid: u64,
    pub title: String,
    pub web_url: String,
    #[serde(default)]
    pub time_stats: TimeStats,
}

/// A job within a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub name: String,
}

/// Basic project information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
    pub web_url: String,
    pub default_branch: String,
}

/// Capability trait for the remote project-hosting API
///
/// One method per query the correlation engine needs. Implementations own
/// authentication and transport; they do **not** rate-limit or paginate —
/// both concerns are handled by the caller so that the request budget is
/// accounted for in exactly one place.
#[async_trait]
pub trait HostApi: Send + Sync {
    /// List commits touching `path` since `since`, one page at a time
    async fn commits_for_path(
        &self,
        project: &str,
        path: &str,
        since: DateTime<Utc>,
        page: usize,
        per_page: usize,
    ) -> ApiResult<Vec<Commit>>;

    /// Fetch a single commit by id
    async fn commit(&self, project: &str, commit_id: &str) -> ApiResult<Commit>;

    /// List merge requests associated with a commit
    async fn merge_requests_for_commit(
        &self,
        project: &str,
        commit_id: &str,
    ) -> ApiResult<Vec<MergeRequest>>;

    /// Fetch a single merge request by iid
    async fn merge_request(&self, project: &str, iid: u64) -> ApiResult<MergeRequest>;

    /// List issues carrying `label` whose text matches `search`, updated
    /// after `updated_after`
    async fn issues(
        &self,
        project: &str,
        label: &str,
        search: &str,
        updated_after: DateTime<Utc>,
    ) -> ApiResult<Vec<Issue>>;

    /// List pipelines triggered for a commit sha
    async fn pipelines_for_sha(&self, project: &str, sha: &str) -> ApiResult<Vec<Pipeline>>;

    /// List the jobs of a pipeline
    async fn pipeline_jobs(&self, project: &str, pipeline_id: u64) -> ApiResult<Vec<Job>>;

    /// Fetch basic project information
    async fn project(&self, project: &str) -> ApiResult<ProjectInfo>;
}
