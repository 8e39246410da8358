//! Correlation Engine
//!
//! Builds commit→merge-request and commit→pipeline associations for a
//! file over a trailing time window.
//!
//! The strategy is always commit-driven: discover the commits touching
//! the file first (bounded by the window), then resolve the merge
//! requests and pipelines those commits are associated with. This keeps
//! cost proportional to the file's recent activity instead of scanning
//! every MR or pipeline in the project.
//!
//! Correlation is best-effort, not transactional. A lookup failure for
//! one commit (no associated MR, transient API error) drops that commit
//! from the result and the rest of the batch continues.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{Duration, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::api::{Commit, HostApi, MergeRequest, MergeRequestState, Pipeline, ProjectInfo};
use crate::error::ApiResult;
use crate::paginate::{fetch_all, PER_PAGE};
use crate::ratelimit::RateLimiter;

/// A bug issue with positive tracked time, attributed to a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedIssue {
    pub iid: u64,
    pub title: String,
    pub url: String,
    /// Tracked time converted from the host's seconds to hours
    pub hours_spent: f64,
}

/// Placeholder result of the code-quality artifact capability
///
/// Parsing code-quality JSON out of CI artifacts is not implemented;
/// this summary only reports that a code-quality job exists for the
/// merge request's head pipeline. `complexity_available` stays `false`
/// until an artifact parser lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeQualitySummary {
    pub complexity_available: bool,
    pub note: String,
}

/// Commit-driven correlation over a project's host API
///
/// Holds the API capability and a shared rate limiter. Concurrent
/// engines running against the same API credential should be handed the
/// same limiter so the global request ceiling is honoured; independent
/// credentials can isolate theirs.
pub struct CorrelationEngine {
    api: Arc<dyn HostApi>,
    limiter: Arc<Mutex<RateLimiter>>,
}

impl CorrelationEngine {
    /// Create an engine with its own rate limiter
    pub fn new(api: Arc<dyn HostApi>) -> Self {
        Self::with_limiter(api, Arc::new(Mutex::new(RateLimiter::new())))
    }

    /// Create an engine sharing an existing rate limiter
    pub fn with_limiter(api: Arc<dyn HostApi>, limiter: Arc<Mutex<RateLimiter>>) -> Self {
        Self { api, limiter }
    }

    /// The limiter this engine admits requests through
    pub fn limiter(&self) -> Arc<Mutex<RateLimiter>> {
        Arc::clone(&self.limiter)
    }

    /// Commits touching `path` within the trailing `window_days`
    pub async fn commits_for_file(
        &self,
        project: &str,
        path: &str,
        window_days: u32,
    ) -> ApiResult<Vec<Commit>> {
        let since = Utc::now() - Duration::days(window_days as i64);

        let commits = fetch_all(&self.limiter, |page| {
            self.api
                .commits_for_path(project, path, since, page, PER_PAGE)
        })
        .await?;

        debug!(
            "{} commit(s) touched {} in the last {} day(s)",
            commits.len(),
            path,
            window_days
        );
        Ok(commits)
    }

    /// Merged merge requests that carried commits touching `path`
    ///
    /// Short-circuits to empty on zero commits; never scans all MRs in
    /// the project. MRs shared by several commits are collapsed by iid
    /// before each unique iid is resolved to a full record.
    pub async fn merge_requests_for_file(
        &self,
        project: &str,
        path: &str,
        window_days: u32,
    ) -> ApiResult<Vec<MergeRequest>> {
        let commits = self.commits_for_file(project, path, window_days).await?;
        if commits.is_empty() {
            return Ok(Vec::new());
        }

        let mut merged_iids = BTreeSet::new();
        for commit in &commits {
            self.limiter.lock().await.admit().await;
            match self.api.merge_requests_for_commit(project, &commit.id).await {
                Ok(mrs) => {
                    for mr in mrs {
                        if mr.state == MergeRequestState::Merged {
                            merged_iids.insert(mr.iid);
                        }
                    }
                }
                Err(err) => {
                    debug!("Skipping commit {}: MR lookup failed: {}", commit.id, err);
                }
            }
        }

        let mut merge_requests = Vec::with_capacity(merged_iids.len());
        for iid in merged_iids {
            self.limiter.lock().await.admit().await;
            match self.api.merge_request(project, iid).await {
                Ok(mr) => merge_requests.push(mr),
                Err(err) => debug!("Skipping merge request !{}: {}", iid, err),
            }
        }

        info!(
            "Correlated {} merged MR(s) with {} via {} commit(s)",
            merge_requests.len(),
            path,
            commits.len()
        );
        Ok(merge_requests)
    }

    /// Pipelines triggered for commits touching `path`
    ///
    /// Deduplicated by pipeline id; a commit whose pipeline lookup fails
    /// is skipped without aborting the rest.
    pub async fn pipelines_for_file(
        &self,
        project: &str,
        path: &str,
        window_days: u32,
    ) -> ApiResult<Vec<Pipeline>> {
        let commits = self.commits_for_file(project, path, window_days).await?;
        if commits.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipelines: BTreeMap<u64, Pipeline> = BTreeMap::new();
        for commit in &commits {
            self.limiter.lock().await.admit().await;
            match self.api.pipelines_for_sha(project, &commit.id).await {
                Ok(batch) => {
                    for pipeline in batch {
                        pipelines.insert(pipeline.id, pipeline);
                    }
                }
                Err(err) => {
                    debug!(
                        "Skipping commit {}: pipeline lookup failed: {}",
                        commit.id, err
                    );
                }
            }
        }

        Ok(pipelines.into_values().collect())
    }

    /// Bug issues mentioning `path` with positive tracked time
    ///
    /// Tracked time arrives from the host in seconds and is converted to
    /// hours here; issues without tracked time are dropped.
    pub async fn bug_issues_for_file(
        &self,
        project: &str,
        path: &str,
        window_days: u32,
    ) -> ApiResult<Vec<TrackedIssue>> {
        let updated_after = Utc::now() - Duration::days(window_days as i64);

        self.limiter.lock().await.admit().await;
        let issues = self.api.issues(project, "bug", path, updated_after).await?;

        let tracked: Vec<TrackedIssue> = issues
            .into_iter()
            .filter(|issue| issue.time_stats.total_time_spent > 0)
            .map(|issue| TrackedIssue {
                iid: issue.iid,
                title: issue.title,
                url: issue.web_url,
                hours_spent: issue.time_stats.total_time_spent as f64 / 3600.0,
            })
            .collect();

        debug!(
            "{} bug issue(s) with tracked time mention {}",
            tracked.len(),
            path
        );
        Ok(tracked)
    }

    /// Basic project information
    pub async fn project_info(&self, project: &str) -> ApiResult<ProjectInfo> {
        self.limiter.lock().await.admit().await;
        self.api.project(project).await
    }

    /// Code-quality metrics for a merge request's head pipeline
    ///
    /// Locates a code-quality job but does not parse its artifacts; see
    /// [`CodeQualitySummary`]. Every failure along the lookup chain (no
    /// head pipeline, no such job, transient API error) degrades to
    /// `None`.
    pub async fn code_quality_for_merge_request(
        &self,
        project: &str,
        mr_iid: u64,
    ) -> Option<CodeQualitySummary> {
        self.limiter.lock().await.admit().await;
        let mr = self.api.merge_request(project, mr_iid).await.ok()?;
        let pipeline_id = mr.head_pipeline_id?;

        self.limiter.lock().await.admit().await;
        let jobs = self.api.pipeline_jobs(project, pipeline_id).await.ok()?;

        let job = jobs.into_iter().find(|job| {
            let name = job.name.to_lowercase();
            name.contains("code_quality") || name.contains("codeclimate")
        })?;

        debug!(
            "Merge request !{} has code-quality job {} on pipeline {}",
            mr_iid, job.id, pipeline_id
        );
        Some(CodeQualitySummary {
            complexity_available: false,
            note: "code quality parsing from artifacts not yet implemented".to_string(),
        })
    }
}
