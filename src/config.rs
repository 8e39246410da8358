//! Assumptions Configuration
//!
//! Every number in a cost report is either *measured* (pulled from the
//! host API) or *assumed* (declared here). This module holds the assumed
//! half: hourly rates, compute cost, the carbon model, effort estimates,
//! and the thresholds that decide whether a debt item is worth a tracked
//! issue.
//!
//! The configuration is loaded once from a YAML file and read-only for
//! the lifetime of a calculation run. An absent file falls back to the
//! built-in defaults; sections and fields missing from a partial file
//! fall back individually.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Monetary and energy cost assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAssumptions {
    /// Loaded developer cost in USD per hour
    pub dev_hourly_rate: f64,
    /// CI compute cost in USD per runner-minute
    pub compute_cost_per_minute: f64,
    /// Runner class the compute figures describe
    pub runner_type: String,
    /// Energy drawn per runner-minute
    pub kwh_per_compute_minute: f64,
    /// Grid carbon intensity in kg CO2 per kWh
    pub co2_per_kwh: f64,
    /// Grid region the carbon intensity belongs to
    pub grid_region: String,
    /// Where these figures come from, carried into every report
    pub source: String,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            dev_hourly_rate: 75.0,
            compute_cost_per_minute: 0.02,
            runner_type: "gitlab-saas-linux".to_string(),
            kwh_per_compute_minute: 0.000195,
            co2_per_kwh: 0.475,
            grid_region: "us-east".to_string(),
            source: "industry average".to_string(),
        }
    }
}

/// Effort estimates per class of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffortAssumptions {
    pub avg_bug_fix_hours: f64,
    pub avg_ci_failure_debug_hours: f64,
    pub avg_refactor_hours_per_100_loc: f64,
    /// Where these estimates come from
    pub source: String,
}

impl Default for EffortAssumptions {
    fn default() -> Self {
        Self {
            avg_bug_fix_hours: 3.0,
            avg_ci_failure_debug_hours: 1.0,
            avg_refactor_hours_per_100_loc: 2.0,
            source: "industry benchmarks".to_string(),
        }
    }
}

/// Decision thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum annual cost (USD) to justify creating a tracked issue
    pub create_issue_annual_cost: f64,
    /// Minimum ROI multiplier to justify creating a tracked issue
    pub create_issue_roi: f64,
    pub severity_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            create_issue_annual_cost: 5000.0,
            create_issue_roi: 50.0,
            severity_threshold: 7.0,
        }
    }
}

/// The full assumptions configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionsConfig {
    pub cost_assumptions: CostAssumptions,
    pub effort_assumptions: EffortAssumptions,
    pub thresholds: Thresholds,
}

impl AssumptionsConfig {
    /// Load assumptions from a YAML file
    ///
    /// An absent file is not an error: the built-in defaults apply. A
    /// file that exists but cannot be read or parsed is a
    /// [`ConfigError`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            info!(
                "No assumptions file at {}, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded assumptions from {}", path.display());
        Ok(config)
    }

    /// Developer cost in USD per hour
    pub fn dev_rate(&self) -> f64 {
        self.cost_assumptions.dev_hourly_rate
    }

    /// CI compute cost in USD per runner-minute
    pub fn compute_cost_per_min(&self) -> f64 {
        self.cost_assumptions.compute_cost_per_minute
    }

    /// Assumed hours to fix one bug
    pub fn avg_bug_fix_hours(&self) -> f64 {
        self.effort_assumptions.avg_bug_fix_hours
    }

    /// Assumed hours to debug one CI failure
    pub fn avg_ci_failure_hours(&self) -> f64 {
        self.effort_assumptions.avg_ci_failure_debug_hours
    }

    /// Assumed refactoring hours per 100 lines of code
    pub fn refactor_hours_per_100_loc(&self) -> f64 {
        self.effort_assumptions.avg_refactor_hours_per_100_loc
    }

    /// Whether a debt item justifies creating a tracked issue
    ///
    /// Either signal alone is sufficient: annual cost at or above the
    /// cost threshold, or ROI at or above the ROI threshold.
    pub fn should_create_issue(&self, annual_cost: f64, roi: f64) -> bool {
        annual_cost >= self.thresholds.create_issue_annual_cost
            || roi >= self.thresholds.create_issue_roi
    }
}
