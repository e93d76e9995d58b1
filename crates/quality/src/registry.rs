//! Rubric category registry.
//!
//! The standard rubric is configuration: ten weighted categories summing to
//! 1.0. Custom categories and weight overrides are explicit operations and
//! the registry never renormalizes on its own; call [`CategoryRegistry::renormalized`].

use docgrade_core::Category;
use crate::error::{QualityError, Result};

/// Weight given to an appended custom category.
pub const DEFAULT_CUSTOM_WEIGHT: f64 = 0.05;

/// Tolerance used when checking that weights sum to 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// (id, name, description, weight, owner)
const STANDARD_RUBRIC: [(&str, &str, &str, f64, &str); 10] = [
    ("problem_definition", "Problem Definition", "The problem is specific, evidenced, and sized", 0.20, "product"),
    ("solution_fit", "Solution Fit", "The proposed requirements address the stated problem", 0.15, "product"),
    ("user_understanding", "User Understanding", "Personas and stories reflect real users", 0.10, "design"),
    ("market_awareness", "Market Awareness", "Competitors and differentiation are understood", 0.10, "product"),
    ("scope_discipline", "Scope Discipline", "Phasing and non-goals keep scope contained", 0.10, "product"),
    ("requirements_quality", "Requirements Quality", "Requirements are prioritized, testable, and traced", 0.10, "engineering"),
    ("metrics_quality", "Metrics Quality", "Objectives have measurable key results with targets", 0.10, "product"),
    ("ux_coverage", "UX Coverage", "Flows, principles, and accessibility are covered", 0.05, "design"),
    ("technical_feasibility", "Technical Feasibility", "Architecture, constraints, and dependencies are known", 0.05, "engineering"),
    ("risk_management", "Risk Management", "Risks are rated and mitigated", 0.05, "product"),
];

/// The fixed reference rubric.
pub fn standard_categories() -> Vec<Category> {
    STANDARD_RUBRIC
        .iter()
        .map(|(id, name, description, weight, owner)| Category {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            weight: *weight,
            owner: owner.to_string(),
        })
        .collect()
}

/// Ordered set of rubric categories.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Registry holding the standard rubric.
    pub fn standard() -> Self {
        Self {
            categories: standard_categories(),
        }
    }

    /// Register a category.
    pub fn register(&mut self, category: Category) -> Result<()> {
        if self.get(&category.id).is_some() {
            return Err(QualityError::DuplicateCategory(category.id));
        }
        if !(category.weight > 0.0 && category.weight <= 1.0) {
            return Err(QualityError::InvalidWeight {
                category: category.id,
                weight: category.weight,
            });
        }
        self.categories.push(category);
        Ok(())
    }

    /// Append an author-defined category with the default weight.
    ///
    /// Weights no longer sum to 1.0 afterwards until the caller renormalizes.
    pub fn add_custom(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        self.register(Category {
            id: id.into(),
            description: format!("Author-defined section: {}", name),
            name,
            weight: DEFAULT_CUSTOM_WEIGHT,
            owner: owner.into(),
        })
    }

    /// Replace a category's weight. Does not renormalize.
    pub fn override_weight(&mut self, id: &str, weight: f64) -> Result<()> {
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(QualityError::InvalidWeight {
                category: id.to_string(),
                weight,
            });
        }
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| QualityError::UnknownCategory(id.to_string()))?;
        category.weight = weight;
        Ok(())
    }

    /// Copy of this registry with weights scaled to sum to 1.0.
    pub fn renormalized(&self) -> Self {
        let total = self.total_weight();
        if total <= 0.0 {
            return self.clone();
        }
        let categories = self
            .categories
            .iter()
            .map(|c| Category {
                weight: c.weight / total,
                ..c.clone()
            })
            .collect();
        Self { categories }
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.categories.iter().map(|c| c.weight).sum()
    }

    /// Check that weights sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let total = self.total_weight();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(QualityError::WeightSum(total));
        }
        Ok(())
    }

    /// Get a category by id.
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// List all categories in registration order.
    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_weights_sum_to_one() {
        let total: f64 = standard_categories().iter().map(|c| c.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(CategoryRegistry::standard().validate().is_ok());
    }

    #[test]
    fn test_standard_rubric_shape() {
        let registry = CategoryRegistry::standard();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.list()[0].id, "problem_definition");
        assert_eq!(registry.get("problem_definition").unwrap().weight, 0.20);
        assert_eq!(registry.get("solution_fit").unwrap().weight, 0.15);
        assert_eq!(registry.get("risk_management").unwrap().weight, 0.05);
        assert!(registry.list().iter().all(|c| c.weight > 0.0 && c.weight <= 1.0));
    }

    #[test]
    fn test_standard_categories_are_stable() {
        assert_eq!(standard_categories(), standard_categories());
    }

    #[test]
    fn test_custom_category_breaks_sum_until_renormalized() {
        let mut registry = CategoryRegistry::standard();
        registry.add_custom("compliance", "Compliance", "legal").unwrap();

        assert_eq!(registry.get("compliance").unwrap().weight, DEFAULT_CUSTOM_WEIGHT);
        assert!(matches!(registry.validate(), Err(QualityError::WeightSum(_))));

        let normalized = registry.renormalized();
        assert!(normalized.validate().is_ok());
        assert!((normalized.total_weight() - 1.0).abs() < 1e-9);
        // Relative order of weights is preserved
        let pd = normalized.get("problem_definition").unwrap().weight;
        let sf = normalized.get("solution_fit").unwrap().weight;
        assert!(pd > sf);
    }

    #[test]
    fn test_override_replaces_weight_without_renormalizing() {
        let mut registry = CategoryRegistry::standard();
        registry.override_weight("problem_definition", 0.30).unwrap();

        assert_eq!(registry.get("problem_definition").unwrap().weight, 0.30);
        assert!((registry.total_weight() - 1.10).abs() < 1e-9);
        assert!(registry.validate().is_err());
    }

    #[test]
    fn test_override_unknown_category() {
        let mut registry = CategoryRegistry::standard();
        let err = registry.override_weight("vibes", 0.1).unwrap_err();
        assert!(matches!(err, QualityError::UnknownCategory(id) if id == "vibes"));
    }

    #[test]
    fn test_rejects_invalid_weights_and_duplicates() {
        let mut registry = CategoryRegistry::standard();
        assert!(matches!(
            registry.override_weight("ux_coverage", 0.0),
            Err(QualityError::InvalidWeight { .. })
        ));
        assert!(matches!(
            registry.override_weight("ux_coverage", 1.5),
            Err(QualityError::InvalidWeight { .. })
        ));
        assert!(matches!(
            registry.add_custom("ux_coverage", "UX", "design"),
            Err(QualityError::DuplicateCategory(_))
        ));
    }

    #[test]
    fn test_empty_registry_renormalizes_to_itself() {
        let registry = CategoryRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.renormalized(), registry);
        assert!(registry.validate().is_err());
    }
}
