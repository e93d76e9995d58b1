//! Serialized report output.
//!
//! Rendering (terminal, Markdown) happens elsewhere; this layer only
//! guarantees that both report shapes survive a JSON round trip.

use docgrade_core::{CompletenessReport, EvaluationReport};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Either report shape, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    /// Section completeness
    Completeness(CompletenessReport),
    /// Rubric evaluation
    Evaluation(EvaluationReport),
}

impl Report {
    /// Compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse a report previously produced by [`Report::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether this report blocks the document. Completeness never does.
    pub fn is_passing(&self) -> bool {
        match self {
            Report::Completeness(_) => true,
            Report::Evaluation(evaluation) => evaluation.decision.is_passing(),
        }
    }
}

impl From<CompletenessReport> for Report {
    fn from(report: CompletenessReport) -> Self {
        Report::Completeness(report)
    }
}

impl From<EvaluationReport> for Report {
    fn from(report: EvaluationReport) -> Self {
        Report::Evaluation(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completeness::check_completeness;
    use crate::rubric::{CompletenessJudge, Evaluator};
    use docgrade_core::{PrdDocument, ReviewMetadata};

    #[test]
    fn test_completeness_round_trip() {
        let report = Report::from(check_completeness(&PrdDocument::default()));
        let json = report.to_json().unwrap();
        assert!(json.starts_with("{\"kind\":\"completeness\""));
        assert_eq!(Report::from_json(&json).unwrap(), report);
        assert!(report.is_passing());
    }

    #[test]
    fn test_evaluation_round_trip() {
        let completeness = check_completeness(&PrdDocument::default());
        let evaluation = Evaluator::standard().score_to_evaluation(
            &completeness,
            &CompletenessJudge,
            ReviewMetadata::new("prd", "Empty", "0.1"),
        );
        let report = Report::from(evaluation);

        let value = report.to_value().unwrap();
        assert_eq!(value["kind"], "evaluation");
        assert_eq!(value["decision"]["status"], "reject");
        assert!(value["metadata"]["report_id"].is_string());

        let pretty = report.to_json_pretty().unwrap();
        assert_eq!(Report::from_json(&pretty).unwrap(), report);
        assert!(!report.is_passing());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Report::from_json(r#"{"kind":"slides"}"#).is_err());
    }
}
