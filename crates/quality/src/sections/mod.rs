//! Section scorers.
//!
//! One scorer per document section, each a pure function of the document.
//! Scorers accumulate points against a private budget through [`PointTally`],
//! which handles clamping, percentage conversion, and status derivation.
//! Per-item checks pay out once any item passes, so credit is monotone in
//! added content.

mod optional;
mod required;

pub use optional::{
    AssumptionsScorer, MarketContextScorer, OutOfScopeScorer, RisksScorer, TechnicalScorer,
    UxDesignScorer,
};
pub use required::{
    MetadataScorer, ObjectivesScorer, PersonasScorer, ProblemStatementScorer, RequirementsScorer,
    RoadmapScorer, UserStoriesScorer,
};

use docgrade_core::{PrdDocument, SectionScore};
use crate::error::{QualityError, Result};

/// Minimum length of a paragraph that earns full credit.
pub const MIN_PARAGRAPH_CHARS: usize = 100;

/// Scores one section of a document.
pub trait SectionScorer: Send + Sync {
    /// Stable section id.
    fn id(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// Whether the document type requires this section.
    fn required(&self) -> bool;

    /// Point allocation of this section in the overall score.
    fn max_points(&self) -> f64;

    /// How to improve the section, attached to recommendations.
    fn guidance(&self) -> &'static str;

    /// Score the section.
    fn score(&self, doc: &PrdDocument) -> SectionScore;
}

/// Point accumulator shared by all scorers.
#[derive(Debug, Clone)]
pub struct PointTally {
    budget: f64,
    earned: f64,
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl PointTally {
    /// Start a tally against a sub-check budget.
    pub fn new(budget: f64) -> Self {
        Self {
            budget,
            earned: 0.0,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Award points.
    pub fn award(&mut self, points: f64) {
        self.earned += points;
    }

    /// Award `points` once at least one item passes a check.
    ///
    /// Items failing the check are reported as issues, not deducted.
    pub fn award_any(&mut self, points: f64, hits: usize) {
        if hits > 0 {
            self.earned += points;
        }
    }

    /// Record missing or weak content.
    pub fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(message.into());
    }

    /// Record an optional enhancement.
    pub fn suggest(&mut self, message: impl Into<String>) {
        self.suggestions.push(message.into());
    }

    /// Points earned so far, before clamping.
    pub fn earned(&self) -> f64 {
        self.earned
    }

    /// Percentage of the budget earned, clamped to 0-100.
    pub fn percentage(&self) -> f64 {
        if self.budget <= 0.0 {
            return 0.0;
        }
        let clamped = self.earned.clamp(0.0, self.budget);
        (clamped / self.budget * 100.0).min(100.0)
    }

    /// Convert into a section score.
    pub fn finish(self, scorer: &dyn SectionScorer) -> SectionScore {
        let mut score = SectionScore::new(
            scorer.id(),
            scorer.name(),
            self.percentage(),
            scorer.max_points(),
            scorer.required(),
        );
        score.issues = self.issues;
        score.suggestions = self.suggestions;
        tracing::debug!(
            section = scorer.id(),
            score = score.score,
            status = score.status.as_str(),
            "Scored section"
        );
        score
    }
}

/// Score for an optional section that is entirely absent.
pub(crate) fn absent(scorer: &dyn SectionScorer, suggestion: &str) -> SectionScore {
    let mut tally = PointTally::new(1.0);
    tally.suggest(suggestion);
    tally.finish(scorer)
}

/// Whether a string has non-whitespace content.
pub(crate) fn filled(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Number of non-blank entries.
pub(crate) fn filled_count(items: &[String]) -> usize {
    items.iter().filter(|s| filled(s)).count()
}

/// Trimmed character count.
pub(crate) fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}

/// Ordered set of section scorers for one document type.
pub struct ScorerRegistry {
    scorers: Vec<Box<dyn SectionScorer>>,
}

impl ScorerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            scorers: Vec::new(),
        }
    }

    /// The PRD rubric: 7 required and 6 optional sections.
    pub fn prd() -> Self {
        Self {
            scorers: vec![
                Box::new(MetadataScorer),
                Box::new(ProblemStatementScorer),
                Box::new(ObjectivesScorer),
                Box::new(PersonasScorer),
                Box::new(UserStoriesScorer),
                Box::new(RequirementsScorer),
                Box::new(RoadmapScorer),
                Box::new(MarketContextScorer),
                Box::new(UxDesignScorer),
                Box::new(TechnicalScorer),
                Box::new(RisksScorer),
                Box::new(AssumptionsScorer),
                Box::new(OutOfScopeScorer),
            ],
        }
    }

    /// Register a scorer. Ids must be unique.
    pub fn register(&mut self, scorer: Box<dyn SectionScorer>) -> Result<()> {
        if self.get(scorer.id()).is_some() {
            return Err(QualityError::DuplicateSection(scorer.id().to_string()));
        }
        self.scorers.push(scorer);
        Ok(())
    }

    /// Get a scorer by section id.
    pub fn get(&self, id: &str) -> Option<&dyn SectionScorer> {
        self.scorers
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.as_ref())
    }

    /// Iterate scorers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SectionScorer> {
        self.scorers.iter().map(|s| s.as_ref())
    }

    /// Number of registered scorers.
    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    /// Whether no scorer is registered.
    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }

    /// Sum of all point allocations.
    pub fn total_points(&self) -> f64 {
        self.scorers.iter().map(|s| s.max_points()).sum()
    }
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        Self::prd()
    }
}
