//! Document quality engine.
//!
//! Section scorers, completeness aggregation, rubric evaluation and the
//! decision policy. Every scoring operation is a pure function of its
//! input; only registry and configuration setup can fail.

#![warn(missing_docs)]

pub mod error;
pub mod config;
pub mod registry;
pub mod sections;
pub mod completeness;
pub mod rubric;
pub mod decision;
pub mod report;

pub use error::{QualityError, Result};
pub use config::{DecisionThresholds, EvaluatorConfig, StatusRatios};
pub use registry::{standard_categories, CategoryRegistry};
pub use sections::{PointTally, ScorerRegistry, SectionScorer};
pub use completeness::{check_completeness, issue_priority, score_to_grade, CompletenessChecker};
pub use rubric::{
    category_status, derive_triggers, CategoryJudge, CompletenessJudge, EvaluationBuilder,
    Evaluator, Judgement, ProvidedJudgements,
};
pub use decision::{decide, findings_from_triggers, next_steps, RevisionTrigger};
pub use report::Report;
