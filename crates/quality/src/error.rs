//! Errors raised by registry and configuration misuse.
//!
//! Scoring never fails; these only surface when wiring the engine up.

/// Result type for quality engine setup and serialization.
pub type Result<T> = std::result::Result<T, QualityError>;

/// Errors that can occur while configuring the engine or serializing reports.
#[derive(Debug, thiserror::Error)]
pub enum QualityError {
    /// A scorer with this section id is already registered
    #[error("Section scorer already registered: {0}")]
    DuplicateSection(String),

    /// A category with this id is already registered
    #[error("Category already registered: {0}")]
    DuplicateCategory(String),

    /// Referenced category does not exist
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Weight outside (0, 1]
    #[error("Invalid weight {weight} for category {category}")]
    InvalidWeight {
        /// Category id
        category: String,
        /// Offending weight
        weight: f64,
    },

    /// Category weights do not add up to 1.0
    #[error("Category weights sum to {0:.4}, expected 1.0")]
    WeightSum(f64),

    /// Thresholds or ratios out of order
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
