//! Cost Model
//!
//! Pure reducers over (measured aggregates, [`AssumptionsConfig`]) that
//! produce annualized cost, time-savings, carbon, and ROI reports.
//!
//! Every dollar figure in a report is traceable to either a measured
//! count or a named assumption: each report carries its raw measured
//! inputs and the exact assumption values used (with their declared
//! source) alongside the totals. Field names and rounding are part of
//! the output contract and must not change.

use serde::{Deserialize, Serialize};

use crate::config::AssumptionsConfig;
use crate::rounding::{round1, round2};

/// Payback sentinel when annual savings are zero: "effectively never"
pub const PAYBACK_NEVER_DAYS: f64 = 999.0;

/// Annual cost breakdown by category, in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub review_overhead: f64,
    pub bug_fixes: f64,
    pub ci_failures: f64,
}

/// Annual hours breakdown by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    pub review_overhead: f64,
    pub bug_fixes: f64,
    pub ci_failures: f64,
}

/// The measured inputs behind a velocity calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityInputs {
    pub commits_per_month: u32,
    pub avg_review_minutes: f64,
    pub bug_hours_tracked: f64,
    pub ci_failures_per_month: u32,
}

/// The assumption values a velocity calculation used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityAssumptions {
    pub dev_hourly_rate_usd: f64,
    pub avg_ci_failure_debug_hours: f64,
    pub source: String,
}

/// Annualized velocity cost of a debt item, in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityCostReport {
    pub annual_cost_usd: f64,
    pub breakdown_usd: CostBreakdown,
    pub measured_inputs: VelocityInputs,
    pub assumptions_used: VelocityAssumptions,
}

/// Annualized velocity cost in hours only, no currency conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSavingsReport {
    pub annual_hours_saved: f64,
    pub breakdown_hours: HoursBreakdown,
    pub measured_inputs: VelocityInputs,
}

/// The measured inputs behind a carbon calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonInputs {
    pub avg_pipeline_minutes: f64,
    pub pipelines_per_month: u32,
    pub monthly_compute_minutes: f64,
}

/// The conversion model a carbon calculation used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonModel {
    pub kwh_per_minute: f64,
    pub co2_per_kwh: f64,
    pub grid_region: String,
    pub source: String,
}

/// Annualized CI carbon footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonReport {
    pub annual_co2_kg: f64,
    pub annual_kwh: f64,
    pub measured_inputs: CarbonInputs,
    pub carbon_model_used: CarbonModel,
    pub note: String,
}

/// Return on investment for fixing a debt item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiReport {
    /// Annual savings over one-time effort cost, as a multiplier
    pub roi: f64,
    pub effort_cost_usd: f64,
    pub effort_hours: f64,
    pub annual_savings_usd: f64,
    /// Days for the effort to pay for itself; [`PAYBACK_NEVER_DAYS`]
    /// when there are no savings
    pub payback_days: f64,
    /// ROI normalized into a bounded 0-10 ranking score
    pub priority_score: f64,
}

/// Annualized velocity cost of a debt item
///
/// Review and CI figures are monthly measurements annualized by 12;
/// `bug_hours_tracked` already covers the analysis period and enters the
/// total unscaled. That asymmetry mirrors how the inputs are collected
/// and is intentional; whether bug hours *should* be annualized is a
/// question for a domain owner, not this function.
pub fn annual_velocity_cost(
    commits_per_month: u32,
    avg_review_minutes: f64,
    bug_hours_tracked: f64,
    ci_failures_per_month: u32,
    config: &AssumptionsConfig,
) -> VelocityCostReport {
    // Review overhead: measured activity x assumed rate
    let monthly_review_hours = (commits_per_month as f64 * avg_review_minutes) / 60.0;
    let monthly_review_cost = monthly_review_hours * config.dev_rate();

    // Bug fixing: measured tracked hours x assumed rate
    let annual_bug_cost = bug_hours_tracked * config.dev_rate();

    // CI failure debugging: measured failures x assumed effort x rate
    let monthly_ci_hours = ci_failures_per_month as f64 * config.avg_ci_failure_hours();
    let monthly_ci_cost = monthly_ci_hours * config.dev_rate();

    let annual_cost = (monthly_review_cost * 12.0) + annual_bug_cost + (monthly_ci_cost * 12.0);

    VelocityCostReport {
        annual_cost_usd: round2(annual_cost),
        breakdown_usd: CostBreakdown {
            review_overhead: round2(monthly_review_cost * 12.0),
            bug_fixes: round2(annual_bug_cost),
            ci_failures: round2(monthly_ci_cost * 12.0),
        },
        measured_inputs: VelocityInputs {
            commits_per_month,
            avg_review_minutes: round2(avg_review_minutes),
            bug_hours_tracked: round2(bug_hours_tracked),
            ci_failures_per_month,
        },
        assumptions_used: VelocityAssumptions {
            dev_hourly_rate_usd: config.dev_rate(),
            avg_ci_failure_debug_hours: config.avg_ci_failure_hours(),
            source: config.cost_assumptions.source.clone(),
        },
    }
}

/// Annualized savings in hours, for consumers unwilling to accept a
/// dollar-rate assumption
pub fn time_savings_only(
    commits_per_month: u32,
    avg_review_minutes: f64,
    bug_hours_tracked: f64,
    ci_failures_per_month: u32,
    config: &AssumptionsConfig,
) -> TimeSavingsReport {
    let monthly_review_hours = (commits_per_month as f64 * avg_review_minutes) / 60.0;
    let monthly_ci_hours = ci_failures_per_month as f64 * config.avg_ci_failure_hours();

    let annual_hours =
        (monthly_review_hours * 12.0) + bug_hours_tracked + (monthly_ci_hours * 12.0);

    TimeSavingsReport {
        annual_hours_saved: round1(annual_hours),
        breakdown_hours: HoursBreakdown {
            review_overhead: round1(monthly_review_hours * 12.0),
            bug_fixes: round1(bug_hours_tracked),
            ci_failures: round1(monthly_ci_hours * 12.0),
        },
        measured_inputs: VelocityInputs {
            commits_per_month,
            avg_review_minutes: round2(avg_review_minutes),
            bug_hours_tracked: round2(bug_hours_tracked),
            ci_failures_per_month,
        },
    }
}

/// Annualized CI carbon footprint
///
/// Pipeline duration and count are measured; the kWh and CO2 factors are
/// a modeled conversion, and the report says so.
pub fn carbon_footprint(
    avg_pipeline_duration_minutes: f64,
    monthly_pipeline_count: u32,
    config: &AssumptionsConfig,
) -> CarbonReport {
    let monthly_compute_minutes = avg_pipeline_duration_minutes * monthly_pipeline_count as f64;

    let kwh_per_min = config.cost_assumptions.kwh_per_compute_minute;
    let co2_per_kwh = config.cost_assumptions.co2_per_kwh;

    let monthly_kwh = monthly_compute_minutes * kwh_per_min;
    let monthly_co2_kg = monthly_kwh * co2_per_kwh;

    CarbonReport {
        annual_co2_kg: round2(monthly_co2_kg * 12.0),
        annual_kwh: round2(monthly_kwh * 12.0),
        measured_inputs: CarbonInputs {
            avg_pipeline_minutes: round2(avg_pipeline_duration_minutes),
            pipelines_per_month: monthly_pipeline_count,
            monthly_compute_minutes: round2(monthly_compute_minutes),
        },
        carbon_model_used: CarbonModel {
            kwh_per_minute: kwh_per_min,
            co2_per_kwh,
            grid_region: config.cost_assumptions.grid_region.clone(),
            source: config.cost_assumptions.source.clone(),
        },
        note: "carbon is modeled conversion, not direct measurement".to_string(),
    }
}

/// Return on investment for fixing a debt item
///
/// Division guards: zero effort cost yields roi 0, zero savings yields
/// the [`PAYBACK_NEVER_DAYS`] sentinel. Neither is a fault.
pub fn roi(annual_savings: f64, effort_hours: f64, config: &AssumptionsConfig) -> RoiReport {
    let effort_cost = effort_hours * config.dev_rate();
    let roi = if effort_cost > 0.0 {
        annual_savings / effort_cost
    } else {
        0.0
    };
    let payback_days = if annual_savings > 0.0 {
        effort_cost / annual_savings * 365.0
    } else {
        PAYBACK_NEVER_DAYS
    };

    RoiReport {
        roi: round1(roi),
        effort_cost_usd: round2(effort_cost),
        effort_hours,
        annual_savings_usd: round2(annual_savings),
        payback_days: round1(payback_days),
        priority_score: (roi / 10.0).min(10.0),
    }
}

/// Linear fix-effort estimate from a finding's size
pub fn estimate_fix_effort(lines_of_code: u32, config: &AssumptionsConfig) -> f64 {
    (lines_of_code as f64 / 100.0) * config.refactor_hours_per_100_loc()
}
