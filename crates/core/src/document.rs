//! PRD document model - the input tree the engine reads.
//!
//! Every field is defaulted so a partially written draft (or `{}`)
//! deserializes into a valid, mostly empty document.

use serde::{Deserialize, Serialize};

/// A product requirements document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrdDocument {
    /// Title, version, authorship
    pub metadata: Metadata,

    /// The problem being solved
    pub problem_statement: ProblemStatement,

    /// Goals with measurable key results
    pub objectives: Objectives,

    /// Target users
    pub personas: Vec<Persona>,

    /// User stories
    pub user_stories: Vec<UserStory>,

    /// Functional and non-functional requirements
    pub requirements: Requirements,

    /// Delivery phases
    pub roadmap: Roadmap,

    /// Market and competitor context
    pub market_context: Option<MarketContext>,

    /// UX principles and flows
    pub ux_design: Option<UxDesign>,

    /// Architecture notes, integrations, constraints
    pub technical_considerations: Option<TechnicalConsiderations>,

    /// Known risks
    pub risks: Vec<Risk>,

    /// Assumptions and external dependencies
    pub assumptions: Option<Assumptions>,

    /// Explicit non-goals
    pub out_of_scope: Vec<OutOfScopeItem>,
}

impl PrdDocument {
    /// Look up a persona by id.
    pub fn persona(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// Look up a user story by id.
    pub fn story(&self, id: &str) -> Option<&UserStory> {
        self.user_stories.iter().find(|s| s.id == id)
    }

    /// Look up a functional requirement by id.
    pub fn requirement(&self, id: &str) -> Option<&Requirement> {
        self.requirements.functional.iter().find(|r| r.id == id)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    pub title: String,

    /// Free-form version label
    pub version: String,

    /// Lifecycle status, if set
    pub status: Option<DocumentStatus>,

    /// Who wrote it
    pub authors: Vec<Person>,

    /// Who signs off
    pub stakeholders: Vec<Person>,
}

/// Lifecycle status of the document itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Being written
    Draft,
    /// Circulated for comments
    InReview,
    /// Signed off
    Approved,
    /// No longer maintained
    Archived,
}

/// An author or stakeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    /// Display name
    pub name: String,
}

/// Problem statement section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemStatement {
    /// The problem, in prose
    pub statement: String,

    /// Who is hurt and how much
    pub impact: String,

    /// Data points, research, support tickets
    pub evidence: Vec<String>,

    /// Who the solution is for
    pub target_audience: String,
}

/// Goals and objectives section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Objectives {
    /// Objectives in priority order
    pub goals: Vec<Objective>,
}

/// A single objective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Objective {
    /// Objective id
    pub id: String,

    /// What the objective aims for
    pub statement: String,

    /// How progress is measured
    pub key_results: Vec<KeyResult>,
}

/// A measurable key result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyResult {
    /// What is measured, in prose
    pub description: String,

    /// Metric name
    pub metric: String,

    /// Current value
    pub baseline: Option<String>,

    /// Value that counts as success
    pub target: Option<String>,
}

impl KeyResult {
    /// Whether a non-blank target is set.
    pub fn has_target(&self) -> bool {
        self.target.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// A user persona.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Persona {
    /// Id referenced by stories
    pub id: String,

    /// Persona name
    pub name: String,

    /// Job or role
    pub role: String,

    /// Who they are
    pub description: String,

    /// What they want to achieve
    pub goals: Vec<String>,

    /// What gets in their way
    pub pain_points: Vec<String>,
}

/// A user story, either structured or as a single sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStory {
    /// Id referenced by requirements
    pub id: String,

    /// Persona this story belongs to
    pub persona_id: Option<String>,

    /// Role part of a structured story
    pub as_a: String,

    /// Want part of a structured story
    pub i_want: String,

    /// Benefit part of a structured story
    pub so_that: String,

    /// Free-form "As a ..., I want ... so that ..." sentence
    pub statement: String,

    /// Testable conditions for done
    pub acceptance_criteria: Vec<String>,
}

/// MoSCoW-style requirement priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoscowPriority {
    /// Must have
    Must,
    /// Should have
    Should,
    /// Could have
    Could,
    /// Won't have this time
    Wont,
}

/// Requirements section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirements {
    /// Behaviour the product must have
    pub functional: Vec<Requirement>,

    /// Quality attributes with targets
    pub non_functional: Vec<NonFunctionalRequirement>,
}

/// A functional requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirement {
    /// Id referenced by roadmap phases
    pub id: String,

    /// Short title
    pub title: String,

    /// Full description
    pub description: String,

    /// MoSCoW priority, if assigned
    pub priority: Option<MoscowPriority>,

    /// Stories this requirement traces back to
    pub story_ids: Vec<String>,
}

/// A non-functional requirement (performance, security, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonFunctionalRequirement {
    /// Requirement id
    pub id: String,

    /// What is constrained
    pub description: String,

    /// Measurable target, such as "p95 under 2s"
    pub target: Option<String>,
}

/// Roadmap section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roadmap {
    /// Phases in delivery order
    pub phases: Vec<RoadmapPhase>,
}

/// A delivery phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapPhase {
    /// Phase id
    pub id: String,

    /// Phase name
    pub name: String,

    /// When it ships, in any notation
    pub timeframe: Option<String>,

    /// What the phase delivers
    pub deliverables: Vec<String>,

    /// How the phase is judged done
    pub success_criteria: Vec<String>,

    /// Requirements delivered in this phase
    pub requirement_ids: Vec<String>,
}

/// Market context (optional).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketContext {
    /// Size of the addressable market
    pub market_size: String,

    /// Direct competitors
    pub competitors: Vec<Competitor>,

    /// Why users would switch
    pub differentiation: String,
}

/// A competitor entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Competitor {
    /// Competitor name
    pub name: String,
}

/// UX design notes (optional).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UxDesign {
    /// Design principles
    pub principles: Vec<String>,

    /// Key user flows
    pub user_flows: Vec<UserFlow>,

    /// Accessibility bar, such as "WCAG 2.1 AA"
    pub accessibility: String,
}

/// A named user flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFlow {
    /// Flow name
    pub name: String,
}

/// Technical considerations (optional).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalConsiderations {
    /// Architecture notes
    pub architecture: String,

    /// Systems this integrates with
    pub integrations: Vec<String>,

    /// Technical limits to respect
    pub constraints: Vec<String>,
}

/// A project risk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Risk {
    /// Risk id
    pub id: String,

    /// What could go wrong
    pub description: String,

    /// How likely it is
    pub likelihood: Option<RiskLevel>,

    /// How bad it would be
    pub impact: Option<RiskLevel>,

    /// Plan to reduce it
    pub mitigation: String,
}

/// Likelihood / impact rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

/// Assumptions and dependencies (optional).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    /// Things taken as true
    pub assumptions: Vec<String>,

    /// External teams or systems relied on
    pub dependencies: Vec<Dependency>,
}

/// An external dependency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependency {
    /// What is depended on
    pub name: String,

    /// Team accountable for it
    pub owner: String,
}

/// Something explicitly not being built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutOfScopeItem {
    /// What is excluded
    pub item: String,

    /// Why it is excluded
    pub rationale: String,
}
