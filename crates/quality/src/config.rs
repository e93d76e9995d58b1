//! Evaluator configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{QualityError, Result};
use crate::registry::CategoryRegistry;

/// Score cutoffs for the decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionThresholds {
    /// Approve at or above, absent critical findings
    pub approve: f64,
    /// Revise at or above
    pub revise: f64,
    /// Reject below
    pub reject: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            approve: 8.0,
            revise: 6.5,
            reject: 3.0,
        }
    }
}

/// Ratio of `score / max_score` needed for each category status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusRatios {
    /// Pass at or above
    pub pass: f64,
    /// Warn at or above, fail below
    pub warn: f64,
}

impl Default for StatusRatios {
    fn default() -> Self {
        Self {
            pass: 0.8,
            warn: 0.5,
        }
    }
}

/// Everything the rubric evaluator can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Label carried into the report (`prd`, `mrd`, ...)
    pub review_type: String,

    /// Decision cutoffs
    pub thresholds: DecisionThresholds,

    /// Category status cutoffs
    pub status_ratios: StatusRatios,

    /// Category id -> replacement weight. Not renormalized.
    pub weight_overrides: BTreeMap<String, f64>,

    /// Echoed into the report's next steps
    pub rerun_command: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            review_type: "prd".to_string(),
            thresholds: DecisionThresholds::default(),
            status_ratios: StatusRatios::default(),
            weight_overrides: BTreeMap::new(),
            rerun_command: String::new(),
        }
    }
}

impl EvaluatorConfig {
    /// Parse from JSON; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the rerun command.
    pub fn with_rerun_command(mut self, command: impl Into<String>) -> Self {
        self.rerun_command = command.into();
        self
    }

    /// Check that thresholds and ratios are ordered.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if !(0.0 <= t.reject && t.reject < t.revise && t.revise <= t.approve && t.approve <= 10.0) {
            return Err(QualityError::InvalidConfig(format!(
                "thresholds must satisfy 0 <= reject < revise <= approve <= 10 (got {}, {}, {})",
                t.reject, t.revise, t.approve
            )));
        }
        let r = &self.status_ratios;
        if !(0.0 < r.warn && r.warn <= r.pass && r.pass <= 1.0) {
            return Err(QualityError::InvalidConfig(format!(
                "status ratios must satisfy 0 < warn <= pass <= 1 (got {}, {})",
                r.warn, r.pass
            )));
        }
        Ok(())
    }

    /// Apply weight overrides to a registry. The result is not renormalized.
    pub fn apply_overrides(&self, registry: &CategoryRegistry) -> Result<CategoryRegistry> {
        let mut registry = registry.clone();
        for (id, weight) in &self.weight_overrides {
            registry.override_weight(id, *weight)?;
        }
        Ok(registry)
    }
}
