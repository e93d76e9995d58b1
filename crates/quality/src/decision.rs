//! Findings and the decision policy.
//!
//! Revision triggers arrive with free-form severities (`blocker`, `major`,
//! `minor`) and become numbered findings. The decision is then a fixed,
//! ordered rule set: reject conditions are checked before any threshold,
//! so one blocking finding outweighs a high score.

use docgrade_core::{
    Action, Decision, DecisionStatus, Effort, Finding, FindingCounts, NextSteps, Severity,
};
use serde::{Deserialize, Serialize};

use crate::config::DecisionThresholds;
use crate::registry::CategoryRegistry;

/// Owner assigned when a trigger names an unknown category.
pub const DEFAULT_OWNER: &str = "product";

/// An issue raised upstream that asks for a revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionTrigger {
    /// Category the issue belongs to
    pub category: String,

    /// `blocker`, `major`, `minor`; anything else is low
    pub severity: String,

    /// Short title
    pub title: String,

    /// What is wrong
    pub description: String,

    /// How to fix it
    pub recommendation: String,

    /// Estimated effort, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<Effort>,
}

/// Turn triggers into findings numbered `F-001`, `F-002`, ... in order.
pub fn findings_from_triggers(
    triggers: &[RevisionTrigger],
    registry: &CategoryRegistry,
) -> Vec<Finding> {
    triggers
        .iter()
        .enumerate()
        .map(|(i, trigger)| {
            let severity = Severity::from_trigger(&trigger.severity);
            let owner = registry
                .get(&trigger.category)
                .map(|c| c.owner.clone())
                .unwrap_or_else(|| DEFAULT_OWNER.to_string());

            Finding {
                id: format!("F-{:03}", i + 1),
                category: trigger.category.clone(),
                severity,
                title: trigger.title.clone(),
                description: trigger.description.clone(),
                recommendation: trigger.recommendation.clone(),
                owner,
                effort: trigger.effort.unwrap_or_else(|| severity.default_effort()),
            }
        })
        .collect()
}

/// Apply the decision policy.
pub fn decide(weighted_score: f64, findings: &[Finding], thresholds: &DecisionThresholds) -> Decision {
    let finding_counts = FindingCounts::tally(findings);

    let (status, rationale) = if finding_counts.critical > 0 {
        (
            DecisionStatus::Reject,
            format!(
                "{} critical finding(s) block approval regardless of score {:.3}",
                finding_counts.critical, weighted_score
            ),
        )
    } else if weighted_score < thresholds.reject {
        (
            DecisionStatus::Reject,
            format!(
                "Weighted score {:.3} is below the reject threshold {:.1}",
                weighted_score, thresholds.reject
            ),
        )
    } else if weighted_score >= thresholds.approve {
        (
            DecisionStatus::Approve,
            format!(
                "Weighted score {:.3} meets the approve threshold {:.1} with no critical findings",
                weighted_score, thresholds.approve
            ),
        )
    } else if weighted_score >= thresholds.revise {
        (
            DecisionStatus::Revise,
            format!(
                "Weighted score {:.3} meets the revise threshold {:.1} but not approve {:.1}",
                weighted_score, thresholds.revise, thresholds.approve
            ),
        )
    } else {
        (
            DecisionStatus::HumanReview,
            format!(
                "Weighted score {:.3} is between reject {:.1} and revise {:.1}; needs a human reviewer",
                weighted_score, thresholds.reject, thresholds.revise
            ),
        )
    };

    tracing::debug!(status = status.as_str(), weighted_score, "Decision reached");

    Decision {
        status,
        rationale,
        finding_counts,
    }
}

/// Critical findings become immediate actions; the rest are recommended,
/// most severe first with ties broken by finding id.
pub fn next_steps(findings: &[Finding], rerun_command: &str) -> NextSteps {
    let action = |f: &Finding| Action {
        finding_id: f.id.clone(),
        severity: f.severity,
        title: f.title.clone(),
        owner: f.owner.clone(),
        effort: f.effort,
    };

    let immediate = findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .map(action)
        .collect();

    let mut recommended: Vec<Action> = findings
        .iter()
        .filter(|f| f.severity != Severity::Critical)
        .map(action)
        .collect();
    recommended.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.finding_id.cmp(&b.finding_id))
    });

    NextSteps {
        immediate,
        recommended,
        rerun_command: rerun_command.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger(category: &str, severity: &str) -> RevisionTrigger {
        RevisionTrigger {
            category: category.to_string(),
            severity: severity.to_string(),
            title: format!("{} issue", severity),
            description: "desc".to_string(),
            recommendation: "fix".to_string(),
            effort: None,
        }
    }

    fn findings(severities: &[&str]) -> Vec<Finding> {
        let triggers: Vec<_> = severities
            .iter()
            .map(|s| trigger("problem_definition", s))
            .collect();
        findings_from_triggers(&triggers, &CategoryRegistry::standard())
    }

    #[test]
    fn test_findings_numbering_and_mapping() {
        let mut triggers = vec![
            trigger("problem_definition", "blocker"),
            trigger("ux_coverage", "major"),
            trigger("mystery", "minor"),
            trigger("risk_management", "nit"),
        ];
        triggers[1].effort = Some(Effort::Low);

        let found = findings_from_triggers(&triggers, &CategoryRegistry::standard());
        let ids: Vec<&str> = found.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["F-001", "F-002", "F-003", "F-004"]);

        assert_eq!(found[0].severity, Severity::Critical);
        assert_eq!(found[0].effort, Effort::High);
        assert_eq!(found[0].owner, "product");

        assert_eq!(found[1].severity, Severity::High);
        assert_eq!(found[1].effort, Effort::Low);
        assert_eq!(found[1].owner, "design");

        assert_eq!(found[2].severity, Severity::Medium);
        assert_eq!(found[2].owner, DEFAULT_OWNER);

        assert_eq!(found[3].severity, Severity::Low);
    }

    #[test]
    fn test_critical_finding_overrides_high_score() {
        let decision = decide(9.5, &findings(&["blocker"]), &DecisionThresholds::default());
        assert_eq!(decision.status, DecisionStatus::Reject);
        assert!(!decision.is_passing());
        assert_eq!(decision.finding_counts.critical, 1);
        assert!(decision.rationale.contains("critical"));
    }

    #[test]
    fn test_threshold_ladder() {
        let t = DecisionThresholds::default();
        let none: Vec<Finding> = Vec::new();

        assert_eq!(decide(10.0, &none, &t).status, DecisionStatus::Approve);
        assert_eq!(decide(8.0, &none, &t).status, DecisionStatus::Approve);
        assert_eq!(decide(7.99, &none, &t).status, DecisionStatus::Revise);
        assert_eq!(decide(6.5, &none, &t).status, DecisionStatus::Revise);
        assert_eq!(decide(6.49, &none, &t).status, DecisionStatus::HumanReview);
        assert_eq!(decide(3.0, &none, &t).status, DecisionStatus::HumanReview);
        assert_eq!(decide(2.99, &none, &t).status, DecisionStatus::Reject);
        assert_eq!(decide(0.0, &none, &t).status, DecisionStatus::Reject);
    }

    #[test]
    fn test_thresholds_apply_to_exact_score() {
        let t = DecisionThresholds::default();
        let none: Vec<Finding> = Vec::new();

        assert_eq!(decide(7.996, &none, &t).status, DecisionStatus::Revise);
        assert_eq!(decide(6.496, &none, &t).status, DecisionStatus::HumanReview);
        assert_eq!(decide(2.996, &none, &t).status, DecisionStatus::Reject);
    }

    #[test]
    fn test_high_findings_do_not_block_approval() {
        let decision = decide(8.5, &findings(&["major", "minor"]), &DecisionThresholds::default());
        assert_eq!(decision.status, DecisionStatus::Approve);
        assert!(decision.is_passing());
        assert_eq!(decision.finding_counts.total, 2);
    }

    #[test]
    fn test_next_steps_split_and_order() {
        let found = findings(&["minor", "blocker", "major", "nit", "major", "blocker"]);
        let steps = next_steps(&found, "docgrade review prd.json");

        let immediate: Vec<&str> = steps.immediate.iter().map(|a| a.finding_id.as_str()).collect();
        assert_eq!(immediate, vec!["F-002", "F-006"]);

        let recommended: Vec<&str> = steps.recommended.iter().map(|a| a.finding_id.as_str()).collect();
        assert_eq!(recommended, vec!["F-003", "F-005", "F-001", "F-004"]);

        assert_eq!(steps.rerun_command, "docgrade review prd.json");
    }

    #[test]
    fn test_no_findings_no_steps() {
        let steps = next_steps(&[], "");
        assert!(steps.immediate.is_empty());
        assert!(steps.recommended.is_empty());
    }
}
