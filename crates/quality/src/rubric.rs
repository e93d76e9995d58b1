//! Rubric evaluation.
//!
//! Scores each weighted category through a [`CategoryJudge`], derives
//! revision triggers from the completeness report, and assembles the
//! [`EvaluationReport`] with its decision and next steps.

use std::collections::BTreeMap;

use docgrade_core::{
    Category, CategoryScore, CategoryStatus, CompletenessReport, EvaluationReport, Finding,
    PrdDocument, ReviewMetadata, SectionScore, SectionStatus, CATEGORY_MAX_SCORE,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::completeness::CompletenessChecker;
use crate::config::{EvaluatorConfig, StatusRatios};
use crate::decision::{decide, findings_from_triggers, next_steps, RevisionTrigger};
use crate::error::Result;
use crate::registry::CategoryRegistry;

/// Sections that feed each standard category.
pub const CATEGORY_SECTIONS: [(&str, &[&str]); 10] = [
    ("problem_definition", &["problem_statement"]),
    ("solution_fit", &["problem_statement", "requirements"]),
    ("user_understanding", &["personas", "user_stories"]),
    ("market_awareness", &["market_context"]),
    ("scope_discipline", &["roadmap", "out_of_scope", "metadata"]),
    ("requirements_quality", &["requirements", "user_stories"]),
    ("metrics_quality", &["objectives"]),
    ("ux_coverage", &["ux_design"]),
    ("technical_feasibility", &["technical", "assumptions"]),
    ("risk_management", &["risks"]),
];

/// Section ids mapped to a category; empty for custom categories.
pub fn sections_for(category: &str) -> &'static [&'static str] {
    CATEGORY_SECTIONS
        .iter()
        .find(|(id, _)| *id == category)
        .map(|(_, sections)| *sections)
        .unwrap_or(&[])
}

/// First category that draws on a section.
pub fn category_for_section(section: &str) -> Option<&'static str> {
    CATEGORY_SECTIONS
        .iter()
        .find(|(_, sections)| sections.contains(&section))
        .map(|(id, _)| *id)
}

/// Classify a category score against the status ratios.
pub fn category_status(score: f64, max_score: f64, ratios: &StatusRatios) -> CategoryStatus {
    if max_score <= 0.0 {
        return CategoryStatus::Fail;
    }
    let ratio = score / max_score;
    if ratio >= ratios.pass {
        CategoryStatus::Pass
    } else if ratio >= ratios.warn {
        CategoryStatus::Warn
    } else {
        CategoryStatus::Fail
    }
}

/// A judge's verdict on one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgement {
    /// 0-10
    pub score: f64,

    /// Why the score was given
    pub justification: String,

    /// Supporting quotes or observations
    #[serde(default)]
    pub evidence: Vec<String>,
}

impl Judgement {
    /// Create a judgement without evidence.
    pub fn new(score: f64, justification: impl Into<String>) -> Self {
        Self {
            score,
            justification: justification.into(),
            evidence: Vec::new(),
        }
    }

    /// Add a piece of evidence.
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence.push(evidence.into());
        self
    }
}

/// Scores rubric categories.
///
/// `None` means the category has not been judged yet; it is reported as
/// pending and contributes nothing to the weighted score.
pub trait CategoryJudge {
    /// Judge one category.
    fn judge(&self, category: &Category, completeness: &CompletenessReport) -> Option<Judgement>;
}

/// Deterministic judge backed by section completeness.
///
/// A category scores the mean completeness of its sections, divided by 10.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletenessJudge;

impl CategoryJudge for CompletenessJudge {
    fn judge(&self, category: &Category, completeness: &CompletenessReport) -> Option<Judgement> {
        let sections: Vec<&SectionScore> = sections_for(&category.id)
            .iter()
            .filter_map(|id| completeness.section(id))
            .collect();
        if sections.is_empty() {
            return None;
        }

        let mean = sections.iter().map(|s| s.score).sum::<f64>() / sections.len() as f64;
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();

        Some(Judgement {
            score: mean / 10.0,
            justification: format!("Mean completeness of {} is {:.1}%", names.join(", "), mean),
            evidence: sections
                .iter()
                .map(|s| format!("{}: {:.1}% ({})", s.name, s.score, s.status.as_str()))
                .collect(),
        })
    }
}

/// Judgements supplied from outside, e.g. a reviewer's scored output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvidedJudgements {
    judgements: BTreeMap<String, Judgement>,
}

impl ProvidedJudgements {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a judgement for a category id.
    pub fn with(mut self, category: impl Into<String>, judgement: Judgement) -> Self {
        self.judgements.insert(category.into(), judgement);
        self
    }

    /// Parse a `{ category_id: judgement }` JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of judged categories.
    pub fn len(&self) -> usize {
        self.judgements.len()
    }

    /// Whether nothing was judged.
    pub fn is_empty(&self) -> bool {
        self.judgements.is_empty()
    }
}

impl CategoryJudge for ProvidedJudgements {
    fn judge(&self, category: &Category, _completeness: &CompletenessReport) -> Option<Judgement> {
        self.judgements.get(&category.id).cloned()
    }
}

/// Derive revision triggers from section results.
///
/// Required sections: missing is a blocker, partial is major, complete
/// with issues is minor. Optional sections with issues are minor.
pub fn derive_triggers(completeness: &CompletenessReport) -> Vec<RevisionTrigger> {
    let mut triggers = Vec::new();

    for section in &completeness.sections {
        let (severity, title) = match (section.required, section.status) {
            (true, SectionStatus::Missing) => ("blocker", format!("{} is missing", section.name)),
            (true, SectionStatus::Partial) => ("major", format!("{} is incomplete", section.name)),
            (_, _) if !section.issues.is_empty() => ("minor", format!("{} has gaps", section.name)),
            _ => continue,
        };

        let description = if section.issues.is_empty() {
            format!("{} scored {:.1}%", section.name, section.score)
        } else {
            section.issues.join("; ")
        };

        let recommendation = completeness
            .recommendations
            .iter()
            .find(|r| r.section == section.id)
            .and_then(|r| r.guidance.clone())
            .or_else(|| section.suggestions.first().cloned())
            .unwrap_or_else(|| format!("Complete the {} section", section.name));

        triggers.push(RevisionTrigger {
            category: category_for_section(&section.id)
                .unwrap_or(section.id.as_str())
                .to_string(),
            severity: severity.to_string(),
            title,
            description,
            recommendation,
            effort: None,
        });
    }

    triggers
}

/// Accumulates category scores and findings into one report.
pub struct EvaluationBuilder {
    metadata: ReviewMetadata,
    config: EvaluatorConfig,
    categories: Vec<CategoryScore>,
    findings: Vec<Finding>,
}

impl EvaluationBuilder {
    /// Start a report.
    pub fn new(metadata: ReviewMetadata, config: EvaluatorConfig) -> Self {
        Self {
            metadata,
            config,
            categories: Vec::new(),
            findings: Vec::new(),
        }
    }

    /// Score a category; `None` marks it pending.
    pub fn with_category(mut self, category: &Category, judgement: Option<Judgement>) -> Self {
        let score = match judgement {
            Some(judgement) => {
                let score = if judgement.score.is_nan() {
                    0.0
                } else {
                    judgement.score.clamp(0.0, CATEGORY_MAX_SCORE)
                };
                CategoryScore {
                    category: category.id.clone(),
                    name: category.name.clone(),
                    score,
                    max_score: CATEGORY_MAX_SCORE,
                    weight: category.weight,
                    status: category_status(score, CATEGORY_MAX_SCORE, &self.config.status_ratios),
                    justification: judgement.justification,
                    evidence: judgement.evidence,
                }
            }
            None => {
                warn!(category = %category.id, "No judgement for category, marking pending");
                CategoryScore {
                    category: category.id.clone(),
                    name: category.name.clone(),
                    score: 0.0,
                    max_score: CATEGORY_MAX_SCORE,
                    weight: category.weight,
                    status: CategoryStatus::Pending,
                    justification: "Not yet evaluated".to_string(),
                    evidence: Vec::new(),
                }
            }
        };
        self.categories.push(score);
        self
    }

    /// Set the findings.
    pub fn with_findings(mut self, findings: Vec<Finding>) -> Self {
        self.findings = findings;
        self
    }

    /// Compute the weighted score, decision and next steps.
    pub fn finalize(self) -> EvaluationReport {
        // Thresholds apply to the exact sum; rounding is for display only
        let total: f64 = self.categories.iter().map(|c| c.weighted_contribution()).sum();
        let weighted_score = total.clamp(0.0, CATEGORY_MAX_SCORE);

        let decision = decide(weighted_score, &self.findings, &self.config.thresholds);
        let next_steps = next_steps(&self.findings, &self.config.rerun_command);

        let pending = self
            .categories
            .iter()
            .filter(|c| c.status == CategoryStatus::Pending)
            .count();
        let mut summary = format!(
            "{} review of \"{}\": weighted score {:.2}/10, decision {} ({} findings, {} critical).",
            self.config.review_type.to_uppercase(),
            self.metadata.document_title,
            weighted_score,
            decision.status.as_str(),
            decision.finding_counts.total,
            decision.finding_counts.critical,
        );
        if pending > 0 {
            summary.push_str(&format!(" {} categories pending.", pending));
        }

        info!(
            weighted_score,
            decision = decision.status.as_str(),
            findings = decision.finding_counts.total,
            "Evaluation finalized"
        );

        EvaluationReport {
            review_type: self.config.review_type,
            metadata: self.metadata,
            categories: self.categories,
            findings: self.findings,
            weighted_score,
            decision,
            next_steps,
            summary,
        }
    }
}

/// Rubric evaluator bound to a validated category set and configuration.
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: CategoryRegistry,
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Apply weight overrides and validate that weights sum to 1.0.
    pub fn new(registry: CategoryRegistry, config: EvaluatorConfig) -> Result<Self> {
        config.validate()?;
        let registry = config.apply_overrides(&registry)?;
        registry.validate()?;
        Ok(Self { registry, config })
    }

    /// Evaluator over the standard rubric with default settings.
    pub fn standard() -> Self {
        Self {
            registry: CategoryRegistry::standard(),
            config: EvaluatorConfig::default(),
        }
    }

    /// Categories in use, after overrides.
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Active configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate a completeness result.
    pub fn score_to_evaluation(
        &self,
        completeness: &CompletenessReport,
        judge: &dyn CategoryJudge,
        metadata: ReviewMetadata,
    ) -> EvaluationReport {
        let triggers = derive_triggers(completeness);
        let findings = findings_from_triggers(&triggers, &self.registry);

        self.registry
            .list()
            .iter()
            .fold(
                EvaluationBuilder::new(metadata, self.config.clone()),
                |builder, category| {
                    let judgement = judge.judge(category, completeness);
                    builder.with_category(category, judgement)
                },
            )
            .with_findings(findings)
            .finalize()
    }

    /// Check completeness and evaluate in one pass.
    pub fn evaluate(
        &self,
        checker: &CompletenessChecker,
        doc: &PrdDocument,
        judge: &dyn CategoryJudge,
    ) -> (CompletenessReport, EvaluationReport) {
        let completeness = checker.check_completeness(doc);
        let metadata = ReviewMetadata::new(
            self.config.review_type.clone(),
            doc.metadata.title.clone(),
            doc.metadata.version.clone(),
        );
        let evaluation = self.score_to_evaluation(&completeness, judge, metadata);
        (completeness, evaluation)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QualityError;
    use docgrade_core::{DecisionStatus, Grade, Severity};

    fn section(id: &str, score: f64, required: bool, issues: &[&str]) -> SectionScore {
        let mut s = SectionScore::new(id, id, score, 10.0, required);
        s.issues = issues.iter().map(|i| i.to_string()).collect();
        s
    }

    fn report(sections: Vec<SectionScore>) -> CompletenessReport {
        CompletenessReport {
            overall_score: 0.0,
            grade: Grade::F,
            sections,
            recommendations: Vec::new(),
            summary: String::new(),
            required_complete: 0,
            required_total: 0,
            optional_complete: 0,
            optional_total: 0,
        }
    }

    fn metadata() -> ReviewMetadata {
        ReviewMetadata::new("prd", "Checkout Redesign", "1.0")
    }

    #[test]
    fn test_every_standard_category_is_mapped() {
        for category in CategoryRegistry::standard().list() {
            assert!(!sections_for(&category.id).is_empty(), "{}", category.id);
        }
        assert!(sections_for("compliance").is_empty());
        assert_eq!(category_for_section("requirements"), Some("solution_fit"));
        assert_eq!(category_for_section("glossary"), None);
    }

    #[test]
    fn test_category_status_ratios() {
        let r = StatusRatios::default();
        assert_eq!(category_status(8.0, 10.0, &r), CategoryStatus::Pass);
        assert_eq!(category_status(7.9, 10.0, &r), CategoryStatus::Warn);
        assert_eq!(category_status(5.0, 10.0, &r), CategoryStatus::Warn);
        assert_eq!(category_status(4.9, 10.0, &r), CategoryStatus::Fail);
        assert_eq!(category_status(5.0, 0.0, &r), CategoryStatus::Fail);
    }

    #[test]
    fn test_completeness_judge_averages_sections() {
        let completeness = report(vec![
            section("requirements", 90.0, true, &[]),
            section("user_stories", 60.0, true, &[]),
        ]);
        let registry = CategoryRegistry::standard();
        let category = registry.get("requirements_quality").unwrap();

        let judgement = CompletenessJudge.judge(category, &completeness).unwrap();
        assert_eq!(judgement.score, 7.5);
        assert_eq!(judgement.evidence.len(), 2);

        let unmapped = registry.get("risk_management").unwrap();
        assert!(CompletenessJudge.judge(unmapped, &completeness).is_none());
    }

    #[test]
    fn test_triggers_from_sections() {
        let completeness = report(vec![
            section("metadata", 0.0, true, &["No title"]),
            section("personas", 60.0, true, &["Only one persona"]),
            section("roadmap", 90.0, true, &["Phase has no timeframe"]),
            section("objectives", 100.0, true, &[]),
            section("risks", 50.0, false, &["Risk lacks mitigation"]),
            section("ux_design", 0.0, false, &[]),
        ]);

        let triggers = derive_triggers(&completeness);
        let summary: Vec<(&str, &str)> = triggers
            .iter()
            .map(|t| (t.category.as_str(), t.severity.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("scope_discipline", "blocker"),
                ("user_understanding", "major"),
                ("scope_discipline", "minor"),
                ("risk_management", "minor"),
            ]
        );
        assert_eq!(triggers[0].description, "No title");
    }

    #[test]
    fn test_provided_judgements_leave_pending() {
        let judge = ProvidedJudgements::new()
            .with("problem_definition", Judgement::new(9.0, "Sharp problem"))
            .with("solution_fit", Judgement::new(8.0, "Fits").with_evidence("REQ-1"));
        let evaluation = Evaluator::standard().score_to_evaluation(&report(Vec::new()), &judge, metadata());

        let pd = evaluation.category("problem_definition").unwrap();
        assert_eq!(pd.status, CategoryStatus::Pass);
        let ux = evaluation.category("ux_coverage").unwrap();
        assert_eq!(ux.status, CategoryStatus::Pending);
        assert_eq!(ux.weighted_contribution(), 0.0);

        // 9.0 * 0.20 + 8.0 * 0.15
        assert!((evaluation.weighted_score - 3.0).abs() < 1e-9);
        assert!(evaluation.summary.contains("8 categories pending"));
    }

    #[test]
    fn test_judge_scores_are_clamped() {
        let judge = ProvidedJudgements::new()
            .with("problem_definition", Judgement::new(14.0, "over"))
            .with("solution_fit", Judgement::new(f64::NAN, "nan"))
            .with("ux_coverage", Judgement::new(-2.0, "under"));
        let evaluation = Evaluator::standard().score_to_evaluation(&report(Vec::new()), &judge, metadata());

        assert_eq!(evaluation.category("problem_definition").unwrap().score, 10.0);
        assert_eq!(evaluation.category("solution_fit").unwrap().score, 0.0);
        assert_eq!(evaluation.category("ux_coverage").unwrap().score, 0.0);
        assert!(evaluation.weighted_score <= CATEGORY_MAX_SCORE);
    }

    #[test]
    fn test_blocker_rejects_high_scores() {
        let judge = CategoryRegistry::standard()
            .list()
            .iter()
            .fold(ProvidedJudgements::new(), |j, c| j.with(c.id.clone(), Judgement::new(9.5, "strong")));
        let completeness = report(vec![section("roadmap", 0.0, true, &["No phases"])]);

        let evaluation = Evaluator::standard().score_to_evaluation(&completeness, &judge, metadata());
        assert!((evaluation.weighted_score - 9.5).abs() < 1e-9);
        assert_eq!(evaluation.findings.len(), 1);
        assert_eq!(evaluation.findings[0].severity, Severity::Critical);
        assert_eq!(evaluation.decision.status, DecisionStatus::Reject);
        assert_eq!(evaluation.next_steps.immediate.len(), 1);
    }

    #[test]
    fn test_new_rejects_unbalanced_weights() {
        let mut registry = CategoryRegistry::standard();
        registry.add_custom("compliance", "Compliance", "legal").unwrap();
        assert!(matches!(
            Evaluator::new(registry.clone(), EvaluatorConfig::default()),
            Err(QualityError::WeightSum(_))
        ));
        assert!(Evaluator::new(registry.renormalized(), EvaluatorConfig::default()).is_ok());

        let mut config = EvaluatorConfig::default();
        config.weight_overrides.insert("problem_definition".to_string(), 0.30);
        assert!(matches!(
            Evaluator::new(CategoryRegistry::standard(), config),
            Err(QualityError::WeightSum(_))
        ));
    }

    #[test]
    fn test_weighted_score_is_not_rounded_up() {
        let judge = CategoryRegistry::standard()
            .list()
            .iter()
            .fold(ProvidedJudgements::new(), |j, c| j.with(c.id.clone(), Judgement::new(7.996, "close")));
        let evaluation = Evaluator::standard().score_to_evaluation(&report(Vec::new()), &judge, metadata());

        assert!(evaluation.weighted_score < 8.0);
        assert!((evaluation.weighted_score - 7.996).abs() < 1e-9);
        assert_eq!(evaluation.decision.status, DecisionStatus::Revise);
        assert!(evaluation
            .categories
            .iter()
            .all(|c| c.status == CategoryStatus::Warn));
    }

    #[test]
    fn test_rerun_command_is_echoed() {
        let config = EvaluatorConfig::default().with_rerun_command("docgrade review --json prd.json");
        let evaluator = Evaluator::new(CategoryRegistry::standard(), config).unwrap();
        let evaluation = evaluator.score_to_evaluation(&report(Vec::new()), &CompletenessJudge, metadata());
        assert_eq!(evaluation.next_steps.rerun_command, "docgrade review --json prd.json");
        assert_eq!(evaluation.review_type, "prd");
    }
}
