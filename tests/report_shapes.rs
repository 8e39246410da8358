//! Serialization-contract tests: report field names and rounding are
//! consumed downstream and must stay exactly as they are.

use debtgauge::{
    annual_velocity_cost, carbon_footprint, pipeline_stats, roi, time_savings_only,
    AssumptionsConfig, Pipeline, PipelineStatus,
};

#[test]
fn velocity_report_shape() {
    let config = AssumptionsConfig::default();
    let json = serde_json::to_value(annual_velocity_cost(40, 120.0, 10.0, 5, &config)).unwrap();

    assert_eq!(json["annual_cost_usd"], 77250.0);
    assert_eq!(json["breakdown_usd"]["review_overhead"], 72000.0);
    assert_eq!(json["breakdown_usd"]["bug_fixes"], 750.0);
    assert_eq!(json["breakdown_usd"]["ci_failures"], 4500.0);
    assert_eq!(json["measured_inputs"]["commits_per_month"], 40);
    assert_eq!(json["measured_inputs"]["avg_review_minutes"], 120.0);
    assert_eq!(json["measured_inputs"]["bug_hours_tracked"], 10.0);
    assert_eq!(json["measured_inputs"]["ci_failures_per_month"], 5);
    assert_eq!(json["assumptions_used"]["dev_hourly_rate_usd"], 75.0);
    assert_eq!(json["assumptions_used"]["avg_ci_failure_debug_hours"], 1.0);
    assert_eq!(json["assumptions_used"]["source"], "industry average");
}

#[test]
fn time_savings_report_shape() {
    let config = AssumptionsConfig::default();
    let json = serde_json::to_value(time_savings_only(40, 120.0, 10.0, 5, &config)).unwrap();

    assert_eq!(json["annual_hours_saved"], 1030.0);
    assert_eq!(json["breakdown_hours"]["review_overhead"], 960.0);
    assert_eq!(json["breakdown_hours"]["bug_fixes"], 10.0);
    assert_eq!(json["breakdown_hours"]["ci_failures"], 60.0);
    // Hours-only mode must not leak any currency field.
    assert!(json.get("annual_cost_usd").is_none());
    assert!(json.get("assumptions_used").is_none());
}

#[test]
fn carbon_report_shape() {
    let config = AssumptionsConfig::default();
    let json = serde_json::to_value(carbon_footprint(10.0, 200, &config)).unwrap();

    assert_eq!(json["annual_co2_kg"], 2.22);
    assert_eq!(json["annual_kwh"], 4.68);
    assert_eq!(json["measured_inputs"]["avg_pipeline_minutes"], 10.0);
    assert_eq!(json["measured_inputs"]["pipelines_per_month"], 200);
    assert_eq!(json["measured_inputs"]["monthly_compute_minutes"], 2000.0);
    assert_eq!(json["carbon_model_used"]["kwh_per_minute"], 0.000195);
    assert_eq!(json["carbon_model_used"]["co2_per_kwh"], 0.475);
    assert_eq!(json["carbon_model_used"]["grid_region"], "us-east");
    assert_eq!(
        json["note"],
        "carbon is modeled conversion, not direct measurement"
    );
}

#[test]
fn roi_report_shape() {
    let config = AssumptionsConfig::default();
    let json = serde_json::to_value(roi(7500.0, 10.0, &config)).unwrap();

    assert_eq!(json["roi"], 10.0);
    assert_eq!(json["effort_cost_usd"], 750.0);
    assert_eq!(json["effort_hours"], 10.0);
    assert_eq!(json["annual_savings_usd"], 7500.0);
    assert_eq!(json["payback_days"], 36.5);
    assert_eq!(json["priority_score"], 1.0);
}

#[test]
fn pipeline_stats_shape() {
    let pipelines = vec![
        Pipeline {
            id: 1,
            status: PipelineStatus::Success,
            duration: Some(600),
        },
        Pipeline {
            id: 2,
            status: PipelineStatus::Failed,
            duration: Some(1200),
        },
    ];
    let json = serde_json::to_value(pipeline_stats(&pipelines)).unwrap();

    assert_eq!(json["avg_duration_minutes"], 15.0);
    assert_eq!(json["failure_rate"], 0.5);
    assert_eq!(json["failed_count"], 1);
    assert_eq!(json["total_count"], 2);
    assert_eq!(json["pipeline_ids"], serde_json::json!([1, 2]));
}
