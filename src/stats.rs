//! Aggregate Statistics
//!
//! Reducers that turn collections of merge requests and pipelines into
//! the aggregate metrics the cost model consumes.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::api::{MergeRequest, Pipeline, PipelineStatus};
use crate::rounding::{round2, round3};

/// Parse an ISO-8601 timestamp as reported by the host
///
/// Accepts the "Z" UTC suffix as well as explicit offsets. Returns `None`
/// for anything unparseable; a malformed timestamp is a recoverable
/// condition that invalidates one metric, not the run.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim()).ok()
}

/// Minutes between a merge request's creation and merge
///
/// Returns `None` for merge requests that have not merged, and for
/// merged ones whose timestamps do not parse.
pub fn review_time_minutes(mr: &MergeRequest) -> Option<f64> {
    let merged_at = mr.merged_at.as_deref()?;
    let created = parse_timestamp(&mr.created_at)?;
    let merged = parse_timestamp(merged_at)?;
    Some((merged - created).num_seconds() as f64 / 60.0)
}

/// Aggregate statistics over a pipeline collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Average duration in minutes across all pipelines (2 decimals)
    pub avg_duration_minutes: f64,
    /// Share of pipelines that failed or were canceled (3 decimals)
    pub failure_rate: f64,
    pub failed_count: usize,
    pub total_count: usize,
    /// Ids of every pipeline that entered the aggregate, for traceability
    pub pipeline_ids: Vec<u64>,
}

/// Reduce a pipeline collection into aggregate statistics
///
/// An empty input produces an all-zero report. Pipelines without a
/// recorded duration contribute 0 to the duration sum but still count
/// toward the divisor: the average reflects the best available data over
/// the whole set, not just the measured subset.
pub fn pipeline_stats(pipelines: &[Pipeline]) -> PipelineStats {
    if pipelines.is_empty() {
        return PipelineStats::default();
    }

    let mut total_duration_secs = 0u64;
    let mut failed_count = 0usize;

    for pipeline in pipelines {
        if let Some(duration) = pipeline.duration {
            total_duration_secs += duration;
        }
        if matches!(
            pipeline.status,
            PipelineStatus::Failed | PipelineStatus::Canceled
        ) {
            failed_count += 1;
        }
    }

    let total = pipelines.len();
    let avg_duration_minutes = (total_duration_secs as f64 / total as f64) / 60.0;
    let failure_rate = failed_count as f64 / total as f64;

    PipelineStats {
        avg_duration_minutes: round2(avg_duration_minutes),
        failure_rate: round3(failure_rate),
        failed_count,
        total_count: total,
        pipeline_ids: pipelines.iter().map(|p| p.id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MergeRequestState;

    fn merged_mr(created_at: &str, merged_at: &str) -> MergeRequest {
        MergeRequest {
            iid: 1,
            state: MergeRequestState::Merged,
            created_at: created_at.to_string(),
            merged_at: Some(merged_at.to_string()),
            head_pipeline_id: None,
        }
    }

    fn pipeline(id: u64, status: PipelineStatus, duration: Option<u64>) -> Pipeline {
        Pipeline {
            id,
            status,
            duration,
        }
    }

    #[test]
    fn test_review_time_for_merged_mr() {
        let mr = merged_mr("2024-03-01T10:00:00Z", "2024-03-01T12:00:00Z");
        assert_eq!(review_time_minutes(&mr), Some(120.0));
    }

    #[test]
    fn test_review_time_handles_explicit_offsets() {
        let mr = merged_mr("2024-03-01T10:00:00+02:00", "2024-03-01T10:30:00Z");
        assert_eq!(review_time_minutes(&mr), Some(150.0));
    }

    #[test]
    fn test_review_time_unavailable_for_open_mr() {
        let mut mr = merged_mr("2024-03-01T10:00:00Z", "2024-03-01T12:00:00Z");
        mr.merged_at = None;
        mr.state = MergeRequestState::Opened;
        assert_eq!(review_time_minutes(&mr), None);
    }

    #[test]
    fn test_review_time_unavailable_for_malformed_timestamp() {
        let mr = merged_mr("yesterday-ish", "2024-03-01T12:00:00Z");
        assert_eq!(review_time_minutes(&mr), None);
        let mr = merged_mr("2024-03-01T10:00:00Z", "not a timestamp");
        assert_eq!(review_time_minutes(&mr), None);
    }

    #[test]
    fn test_pipeline_stats_empty_input_yields_zeroed_report() {
        let stats = pipeline_stats(&[]);
        assert_eq!(stats.avg_duration_minutes, 0.0);
        assert_eq!(stats.failure_rate, 0.0);
        assert_eq!(stats.failed_count, 0);
        assert_eq!(stats.total_count, 0);
        assert!(stats.pipeline_ids.is_empty());
    }

    #[test]
    fn test_pipeline_stats_aggregates_durations_and_failures() {
        let pipelines = vec![
            pipeline(1, PipelineStatus::Success, Some(600)),
            pipeline(2, PipelineStatus::Failed, Some(300)),
            pipeline(3, PipelineStatus::Canceled, Some(900)),
        ];
        let stats = pipeline_stats(&pipelines);
        // (600 + 300 + 900) / 3 = 600 seconds = 10 minutes
        assert_eq!(stats.avg_duration_minutes, 10.0);
        assert_eq!(stats.failure_rate, 0.667);
        assert_eq!(stats.failed_count, 2);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.pipeline_ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_pipeline_stats_missing_duration_still_counts_toward_divisor() {
        let pipelines = vec![
            pipeline(1, PipelineStatus::Success, Some(1200)),
            pipeline(2, PipelineStatus::Running, None),
        ];
        let stats = pipeline_stats(&pipelines);
        // 1200 seconds over 2 pipelines = 10 minutes average
        assert_eq!(stats.avg_duration_minutes, 10.0);
        assert_eq!(stats.failure_rate, 0.0);
    }

    #[test]
    fn test_pipeline_stats_unknown_status_is_not_a_failure() {
        let pipelines = vec![pipeline(1, PipelineStatus::Other, Some(60))];
        let stats = pipeline_stats(&pipelines);
        assert_eq!(stats.failed_count, 0);
    }
}
