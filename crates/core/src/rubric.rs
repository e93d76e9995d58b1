//! Rubric model - categories, findings, decision, evaluation report.

use serde::{Deserialize, Serialize};
use crate::id::ReportId;
use crate::Time;

/// Maximum score of a rubric category.
pub const CATEGORY_MAX_SCORE: f64 = 10.0;

/// A weighted rubric category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier (`problem_definition`, ...)
    pub id: String,

    /// Display name
    pub name: String,

    /// What the category measures
    pub description: String,

    /// Fraction of the overall score, in (0, 1]
    pub weight: f64,

    /// Team that owns fixes in this category
    pub owner: String,
}

/// Outcome of a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    /// At or above the pass ratio
    Pass,
    /// At or above the warn ratio
    Warn,
    /// Below the warn ratio
    Fail,
    /// No judgement supplied
    Pending,
}

impl CategoryStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Pass => "pass",
            CategoryStatus::Warn => "warn",
            CategoryStatus::Fail => "fail",
            CategoryStatus::Pending => "pending",
        }
    }
}

/// Score of one rubric category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Category id
    pub category: String,

    /// Category display name
    pub name: String,

    /// 0-10, unrounded
    pub score: f64,

    /// Upper bound of `score`
    pub max_score: f64,

    /// Category weight at evaluation time
    pub weight: f64,

    /// Derived from `score / max_score`
    pub status: CategoryStatus,

    /// Why the score was given
    pub justification: String,

    /// Supporting observations
    pub evidence: Vec<String>,
}

impl CategoryScore {
    /// `score x weight`; pending categories contribute nothing.
    pub fn weighted_contribution(&self) -> f64 {
        if self.status == CategoryStatus::Pending {
            0.0
        } else {
            self.score * self.weight
        }
    }
}

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks approval
    Critical,
    /// Should be fixed before approval
    High,
    /// Worth fixing
    Medium,
    /// Minor polish
    Low,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Map an upstream trigger severity: blocker, major, minor, anything else.
    pub fn from_trigger(trigger: &str) -> Self {
        match trigger.trim().to_ascii_lowercase().as_str() {
            "blocker" => Severity::Critical,
            "major" => Severity::High,
            "minor" => Severity::Medium,
            _ => Severity::Low,
        }
    }

    /// Effort assumed when a trigger does not state one.
    pub fn default_effort(&self) -> Effort {
        match self {
            Severity::Critical => Effort::High,
            Severity::High => Effort::Medium,
            Severity::Medium | Severity::Low => Effort::Low,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// Estimated effort to resolve a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    /// Hours
    Low,
    /// Days
    Medium,
    /// A week or more
    High,
}

/// A severity-tagged issue surfaced by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// `F-001`, `F-002`, ...
    pub id: String,

    /// Category the finding belongs to
    pub category: String,

    /// How serious it is
    pub severity: Severity,

    /// Short title
    pub title: String,

    /// What is wrong
    pub description: String,

    /// How to fix it
    pub recommendation: String,

    /// Team expected to fix it
    pub owner: String,

    /// Estimated effort
    pub effort: Effort,
}

/// Terminal verdict of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    /// Ready to ship
    Approve,
    /// Close, needs another pass
    Revise,
    /// Blocked or too weak
    Reject,
    /// Borderline, a person decides
    HumanReview,
}

impl DecisionStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Approve => "approve",
            DecisionStatus::Revise => "revise",
            DecisionStatus::Reject => "reject",
            DecisionStatus::HumanReview => "human_review",
        }
    }
}

/// Finding counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingCounts {
    /// Critical findings
    pub critical: usize,

    /// High findings
    pub high: usize,

    /// Medium findings
    pub medium: usize,

    /// All findings, low included
    pub total: usize,
}

impl FindingCounts {
    /// Count findings.
    pub fn tally(findings: &[Finding]) -> Self {
        let mut counts = FindingCounts::default();
        for finding in findings {
            match finding.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => {}
            }
            counts.total += 1;
        }
        counts
    }
}

/// The decision and why it was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Verdict
    pub status: DecisionStatus,

    /// Which rule fired
    pub rationale: String,

    /// Findings the decision saw
    pub finding_counts: FindingCounts,
}

impl Decision {
    /// Only an approval passes.
    pub fn is_passing(&self) -> bool {
        self.status == DecisionStatus::Approve
    }
}

/// A follow-up action derived from a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Finding this action resolves
    pub finding_id: String,

    /// Severity of that finding
    pub severity: Severity,

    /// Finding title
    pub title: String,

    /// Who acts
    pub owner: String,

    /// Estimated effort
    pub effort: Effort,
}

/// What the author should do next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NextSteps {
    /// One action per critical finding
    pub immediate: Vec<Action>,

    /// Everything else, most severe first
    pub recommended: Vec<Action>,

    /// Caller-supplied, echoed verbatim
    pub rerun_command: String,
}

/// Report metadata. The only time-dependent part of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewMetadata {
    /// Unique per report
    pub report_id: ReportId,

    /// Kind of document reviewed, e.g. `prd`
    pub review_type: String,

    /// Title of the reviewed document
    pub document_title: String,

    /// Version of the reviewed document
    pub document_version: String,

    /// When the report was produced
    pub generated_at: Time,

    /// Version of this crate
    pub engine_version: String,
}

impl ReviewMetadata {
    /// Create metadata stamped with a fresh id and the current time.
    pub fn new(
        review_type: impl Into<String>,
        document_title: impl Into<String>,
        document_version: impl Into<String>,
    ) -> Self {
        Self {
            report_id: ReportId::new(),
            review_type: review_type.into(),
            document_title: document_title.into(),
            document_version: document_version.into(),
            generated_at: chrono::Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A finalized rubric evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Kind of document reviewed
    pub review_type: String,

    /// Id, timestamps, document identity
    pub metadata: ReviewMetadata,

    /// One score per registered category
    pub categories: Vec<CategoryScore>,

    /// Numbered findings in trigger order
    pub findings: Vec<Finding>,

    /// 0-10, unrounded
    pub weighted_score: f64,

    /// Verdict and rationale
    pub decision: Decision,

    /// Follow-up actions
    pub next_steps: NextSteps,

    /// Human-readable summary
    pub summary: String,
}

impl EvaluationReport {
    /// Find a category score by id.
    pub fn category(&self, id: &str) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.category == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(id: &str, severity: Severity) -> Finding {
        Finding {
            id: id.to_string(),
            category: "problem_definition".to_string(),
            severity,
            title: "t".to_string(),
            description: "d".to_string(),
            recommendation: "r".to_string(),
            owner: "product".to_string(),
            effort: Effort::Low,
        }
    }

    #[test]
    fn test_trigger_severity_mapping() {
        assert_eq!(Severity::from_trigger("blocker"), Severity::Critical);
        assert_eq!(Severity::from_trigger("Major"), Severity::High);
        assert_eq!(Severity::from_trigger(" minor "), Severity::Medium);
        assert_eq!(Severity::from_trigger("nit"), Severity::Low);
        assert_eq!(Severity::from_trigger(""), Severity::Low);
    }

    #[test]
    fn test_every_severity_has_default_effort() {
        let expected = [Effort::High, Effort::Medium, Effort::Low, Effort::Low];
        for (severity, effort) in Severity::ALL.into_iter().zip(expected) {
            assert_eq!(severity.default_effort(), effort, "{}", severity.as_str());
        }
    }

    #[test]
    fn test_finding_counts() {
        let findings = vec![
            finding("F-001", Severity::Critical),
            finding("F-002", Severity::High),
            finding("F-003", Severity::High),
            finding("F-004", Severity::Low),
        ];
        let counts = FindingCounts::tally(&findings);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.high, 2);
        assert_eq!(counts.medium, 0);
        assert_eq!(counts.total, 4);
    }

    #[test]
    fn test_pending_contributes_nothing() {
        let mut score = CategoryScore {
            category: "ux_coverage".to_string(),
            name: "UX Coverage".to_string(),
            score: 6.0,
            max_score: CATEGORY_MAX_SCORE,
            weight: 0.05,
            status: CategoryStatus::Warn,
            justification: String::new(),
            evidence: Vec::new(),
        };
        assert!((score.weighted_contribution() - 0.3).abs() < 1e-9);

        score.status = CategoryStatus::Pending;
        assert_eq!(score.weighted_contribution(), 0.0);
    }

    #[test]
    fn test_decision_status_serializes_snake_case() {
        let json = serde_json::to_string(&DecisionStatus::HumanReview).unwrap();
        assert_eq!(json, "\"human_review\"");
        assert_eq!(DecisionStatus::HumanReview.as_str(), "human_review");
    }
}
