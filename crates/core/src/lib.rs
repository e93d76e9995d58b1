//! docgrade core data models.
//!
//! This crate defines the document tree the quality engine reads and the
//! report shapes it produces.

#![warn(missing_docs)]

// Identities
mod id;

// Input document
mod document;

// Report models
mod completeness;
mod rubric;

// Re-exports
pub use id::*;

// Document
pub use document::{
    PrdDocument, Metadata, DocumentStatus, Person, ProblemStatement, Objectives, Objective,
    KeyResult, Persona, UserStory, MoscowPriority, Requirements, Requirement,
    NonFunctionalRequirement, Roadmap, RoadmapPhase, MarketContext, Competitor, UxDesign,
    UserFlow, TechnicalConsiderations, Risk, RiskLevel, Assumptions, Dependency, OutOfScopeItem,
};

// Completeness
pub use completeness::{
    SectionScore, SectionStatus, Grade, Priority, Recommendation, CompletenessReport,
    COMPLETE_THRESHOLD, PARTIAL_THRESHOLD,
};

// Rubric
pub use rubric::{
    Category, CategoryStatus, CategoryScore, Severity, Effort, Finding, DecisionStatus,
    FindingCounts, Decision, Action, NextSteps, ReviewMetadata, EvaluationReport,
    CATEGORY_MAX_SCORE,
};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
