//! Completeness aggregation.
//!
//! Runs every registered section scorer, weights the section scores by
//! their point allocation, and folds issues and suggestions into a
//! prioritized recommendation list. Never fails: an empty document simply
//! scores zero everywhere.

use docgrade_core::{
    CompletenessReport, Grade, PrdDocument, Priority, Recommendation, SectionScore, SectionStatus,
};
use tracing::info;

use crate::sections::ScorerRegistry;

/// Required sections scoring below this turn their issues critical.
pub const CRITICAL_SECTION_SCORE: f64 = 50.0;

/// Map an overall percentage to a letter grade.
pub fn score_to_grade(score: f64) -> Grade {
    Grade::from_score(score)
}

/// Priority of an issue raised by a section.
pub fn issue_priority(section: &SectionScore) -> Priority {
    match (section.required, section.score < CRITICAL_SECTION_SCORE) {
        (true, true) => Priority::Critical,
        (true, false) => Priority::High,
        (false, _) => Priority::Medium,
    }
}

/// Runs section scorers and aggregates their results.
pub struct CompletenessChecker {
    scorers: ScorerRegistry,
}

impl CompletenessChecker {
    /// Create a checker over a scorer registry.
    pub fn new(scorers: ScorerRegistry) -> Self {
        Self { scorers }
    }

    /// Scorer registry in use.
    pub fn scorers(&self) -> &ScorerRegistry {
        &self.scorers
    }

    /// Score every section and build the report.
    pub fn check_completeness(&self, doc: &PrdDocument) -> CompletenessReport {
        let sections: Vec<SectionScore> = self.scorers.iter().map(|s| s.score(doc)).collect();

        let total_points: f64 = sections.iter().map(|s| s.max_points).sum();
        let earned: f64 = sections.iter().map(|s| s.earned_points()).sum();
        // Unrounded: the grade boundary applies to the exact value
        let overall_score = if total_points > 0.0 {
            (100.0 * earned / total_points).clamp(0.0, 100.0)
        } else {
            0.0
        };
        let grade = score_to_grade(overall_score);

        let count = |required: bool| {
            let total = sections.iter().filter(|s| s.required == required).count();
            let complete = sections
                .iter()
                .filter(|s| s.required == required && s.status == SectionStatus::Complete)
                .count();
            (complete, total)
        };
        let (required_complete, required_total) = count(true);
        let (optional_complete, optional_total) = count(false);

        let recommendations = self.recommendations(&sections);

        let summary = format!(
            "Completeness {:.1}% (grade {}): {}/{} required and {}/{} optional sections complete.",
            overall_score, grade, required_complete, required_total, optional_complete, optional_total
        );

        info!(
            overall_score,
            grade = grade.as_str(),
            required_complete,
            required_total,
            "Completeness check finished"
        );

        CompletenessReport {
            overall_score,
            grade,
            sections,
            recommendations,
            summary,
            required_complete,
            required_total,
            optional_complete,
            optional_total,
        }
    }

    /// Issues become critical/high/medium by section; suggestions are low.
    ///
    /// Ordered by priority, then section order, then original order.
    fn recommendations(&self, sections: &[SectionScore]) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        for section in sections {
            let guidance = self
                .scorers
                .get(&section.id)
                .map(|s| s.guidance().to_string());
            let priority = issue_priority(section);

            for issue in &section.issues {
                recommendations.push(Recommendation {
                    section: section.id.clone(),
                    priority,
                    message: issue.clone(),
                    guidance: guidance.clone(),
                });
            }
            for suggestion in &section.suggestions {
                recommendations.push(Recommendation {
                    section: section.id.clone(),
                    priority: Priority::Low,
                    message: suggestion.clone(),
                    guidance: guidance.clone(),
                });
            }
        }

        // Stable sort keeps section and insertion order within a priority
        recommendations.sort_by_key(|r| r.priority);
        recommendations
    }
}

impl Default for CompletenessChecker {
    fn default() -> Self {
        Self::new(ScorerRegistry::prd())
    }
}

/// Check a document against the standard PRD scorers.
pub fn check_completeness(doc: &PrdDocument) -> CompletenessReport {
    CompletenessChecker::default().check_completeness(doc)
}
