//! Completeness model - per-section scores, grade, recommendations.

use serde::{Deserialize, Serialize};

/// Score at or above which a section is complete.
pub const COMPLETE_THRESHOLD: f64 = 80.0;

/// Score at or above which a section is partial.
pub const PARTIAL_THRESHOLD: f64 = 40.0;

/// Completeness of a single section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// Score at or above the complete threshold
    Complete,
    /// Present but thin
    Partial,
    /// Absent or nearly empty
    Missing,
}

impl SectionStatus {
    /// Map a 0-100 score to a status.
    pub fn from_score(score: f64) -> Self {
        if score >= COMPLETE_THRESHOLD {
            SectionStatus::Complete
        } else if score >= PARTIAL_THRESHOLD {
            SectionStatus::Partial
        } else {
            SectionStatus::Missing
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionStatus::Complete => "complete",
            SectionStatus::Partial => "partial",
            SectionStatus::Missing => "missing",
        }
    }
}

/// Score for one document section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    /// Section id (`personas`, `roadmap`, ...)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// 0-100
    pub score: f64,

    /// Point allocation of this section in the overall score
    pub max_points: f64,

    /// Whether the document type requires this section
    pub required: bool,

    /// Derived from `score`
    pub status: SectionStatus,

    /// Missing or weak required content
    pub issues: Vec<String>,

    /// Optional enhancements
    pub suggestions: Vec<String>,
}

impl SectionScore {
    /// Build a score, clamping to 0-100 and deriving the status.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        score: f64,
        max_points: f64,
        required: bool,
    ) -> Self {
        let score = if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 };
        Self {
            id: id.into(),
            name: name.into(),
            score,
            max_points,
            required,
            status: SectionStatus::from_score(score),
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Points this section contributes to the overall score.
    pub fn earned_points(&self) -> f64 {
        self.score / 100.0 * self.max_points
    }
}

/// Letter grade for the overall completeness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// 90 and above
    A,
    /// 80 to below 90
    B,
    /// 70 to below 80
    C,
    /// 60 to below 70
    D,
    /// Below 60
    F,
}

impl Grade {
    /// A>=90, B>=80, C>=70, D>=60, else F.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Required section scoring below 50
    Critical,
    /// Issue in a required section
    High,
    /// Issue in an optional section
    Medium,
    /// Suggestion
    Low,
}

impl Priority {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// An actionable recommendation derived from a section issue or suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Section id
    pub section: String,

    /// Urgency
    pub priority: Priority,

    /// Issue or suggestion text
    pub message: String,

    /// How to fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

/// Result of a completeness check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// 0-100, unrounded
    pub overall_score: f64,

    /// Letter grade of `overall_score`
    pub grade: Grade,

    /// Per-section scores in registration order
    pub sections: Vec<SectionScore>,

    /// Most urgent first
    pub recommendations: Vec<Recommendation>,

    /// One-line human-readable summary
    pub summary: String,

    /// Required sections that are complete
    pub required_complete: usize,

    /// Required sections scored
    pub required_total: usize,

    /// Optional sections that are complete
    pub optional_complete: usize,

    /// Optional sections scored
    pub optional_total: usize,
}

impl CompletenessReport {
    /// Find a section score by id.
    pub fn section(&self, id: &str) -> Option<&SectionScore> {
        self.sections.iter().find(|s| s.id == id)
    }
}
