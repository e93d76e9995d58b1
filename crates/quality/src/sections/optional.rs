//! Scorers for the optional PRD sections.
//!
//! An absent optional section scores 0 with a single suggestion and no issues.

use docgrade_core::{PrdDocument, SectionScore};

use super::{absent, char_len, filled, filled_count, PointTally, SectionScorer, MIN_PARAGRAPH_CHARS};

/// Market size, competitors, differentiation.
pub struct MarketContextScorer;

impl SectionScorer for MarketContextScorer {
    fn id(&self) -> &'static str {
        "market_context"
    }

    fn name(&self) -> &'static str {
        "Market Context"
    }

    fn required(&self) -> bool {
        false
    }

    fn max_points(&self) -> f64 {
        1.0
    }

    fn guidance(&self) -> &'static str {
        "Size the market, list direct competitors, and state why users would switch."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let market = match &doc.market_context {
            Some(m)
                if !m.competitors.is_empty()
                    || filled(&m.market_size)
                    || filled(&m.differentiation) =>
            {
                m
            }
            _ => return absent(self, "Add market context: size, competitors, and differentiation"),
        };
        let mut tally = PointTally::new(4.0);

        let competitors = market.competitors.iter().filter(|c| filled(&c.name)).count();
        match competitors {
            0 => tally.issue("No competitors listed"),
            1 => tally.award(1.5),
            _ => tally.award(2.0),
        }

        if filled(&market.differentiation) {
            tally.award(1.0);
        } else {
            tally.issue("Differentiation is not described");
        }

        if filled(&market.market_size) {
            tally.award(1.0);
        } else {
            tally.suggest("Estimate the market size");
        }

        tally.finish(self)
    }
}

/// UX principles, user flows, accessibility.
pub struct UxDesignScorer;

impl SectionScorer for UxDesignScorer {
    fn id(&self) -> &'static str {
        "ux_design"
    }

    fn name(&self) -> &'static str {
        "UX Design"
    }

    fn required(&self) -> bool {
        false
    }

    fn max_points(&self) -> f64 {
        1.0
    }

    fn guidance(&self) -> &'static str {
        "Sketch the key user flows and state the accessibility bar."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let ux = match &doc.ux_design {
            Some(ux)
                if !ux.user_flows.is_empty()
                    || filled_count(&ux.principles) > 0
                    || filled(&ux.accessibility) =>
            {
                ux
            }
            _ => return absent(self, "Add UX design notes: principles, key user flows, accessibility"),
        };
        let mut tally = PointTally::new(4.0);

        if ux.user_flows.is_empty() {
            tally.issue("No user flows described");
        } else {
            tally.award(2.0);
        }

        if filled_count(&ux.principles) > 0 {
            tally.award(1.0);
        } else {
            tally.suggest("List the design principles guiding the experience");
        }

        if filled(&ux.accessibility) {
            tally.award(1.0);
        } else {
            tally.issue("Accessibility requirements are not addressed");
        }

        tally.finish(self)
    }
}

/// Architecture overview, integrations, constraints.
pub struct TechnicalScorer;

impl SectionScorer for TechnicalScorer {
    fn id(&self) -> &'static str {
        "technical"
    }

    fn name(&self) -> &'static str {
        "Technical Considerations"
    }

    fn required(&self) -> bool {
        false
    }

    fn max_points(&self) -> f64 {
        1.0
    }

    fn guidance(&self) -> &'static str {
        "Outline the architecture, the systems it integrates with, and known constraints."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let tech = match &doc.technical_considerations {
            Some(t)
                if filled(&t.architecture)
                    || filled_count(&t.integrations) > 0
                    || filled_count(&t.constraints) > 0 =>
            {
                t
            }
            _ => return absent(self, "Add technical considerations: architecture, integrations, constraints"),
        };
        let mut tally = PointTally::new(4.0);

        let len = char_len(&tech.architecture);
        if len >= MIN_PARAGRAPH_CHARS {
            tally.award(2.0);
        } else if len > 0 {
            tally.award(1.0);
            tally.issue("Architecture overview is too brief");
        } else {
            tally.issue("Architecture overview is missing");
        }

        if filled_count(&tech.integrations) > 0 {
            tally.award(1.0);
        } else {
            tally.suggest("List the systems this integrates with");
        }

        if filled_count(&tech.constraints) > 0 {
            tally.award(1.0);
        } else {
            tally.suggest("Note technical constraints (platforms, compliance, legacy systems)");
        }

        tally.finish(self)
    }
}

/// Risks with ratings and mitigations.
pub struct RisksScorer;

impl SectionScorer for RisksScorer {
    fn id(&self) -> &'static str {
        "risks"
    }

    fn name(&self) -> &'static str {
        "Risks"
    }

    fn required(&self) -> bool {
        false
    }

    fn max_points(&self) -> f64 {
        1.0
    }

    fn guidance(&self) -> &'static str {
        "Rate each risk's likelihood and impact and give it an owner-backed mitigation."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let risks = &doc.risks;
        if risks.is_empty() {
            return absent(self, "Identify key risks with likelihood, impact, and mitigation");
        }
        let mut tally = PointTally::new(4.0);
        let total = risks.len();

        tally.award(if total >= 3 { 1.5 } else { 1.0 });

        let mitigated = risks.iter().filter(|r| filled(&r.mitigation)).count();
        tally.award_any(2.0, mitigated);
        if mitigated < total {
            tally.issue(format!("{} risk(s) have no mitigation", total - mitigated));
        }

        let rated = risks
            .iter()
            .filter(|r| r.likelihood.is_some() && r.impact.is_some())
            .count();
        tally.award_any(0.5, rated);
        if rated < total {
            tally.suggest(format!("Rate likelihood and impact for {} risk(s)", total - rated));
        }

        tally.finish(self)
    }
}

/// Assumptions and external dependencies.
pub struct AssumptionsScorer;

impl SectionScorer for AssumptionsScorer {
    fn id(&self) -> &'static str {
        "assumptions"
    }

    fn name(&self) -> &'static str {
        "Assumptions & Dependencies"
    }

    fn required(&self) -> bool {
        false
    }

    fn max_points(&self) -> f64 {
        1.0
    }

    fn guidance(&self) -> &'static str {
        "Write down what must be true for the plan to work and who owns each dependency."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let section = match &doc.assumptions {
            Some(a) if filled_count(&a.assumptions) > 0 || !a.dependencies.is_empty() => a,
            _ => return absent(self, "Document assumptions and external dependencies"),
        };
        let mut tally = PointTally::new(4.0);

        if filled_count(&section.assumptions) > 0 {
            tally.award(2.0);
        } else {
            tally.issue("No assumptions listed");
        }

        let dependencies = &section.dependencies;
        if dependencies.is_empty() {
            tally.suggest("List external dependencies");
        } else {
            tally.award(1.0);
            let owned = dependencies.iter().filter(|d| filled(&d.owner)).count();
            tally.award_any(1.0, owned);
            if owned < dependencies.len() {
                tally.issue(format!(
                    "{} dependency(ies) have no owner",
                    dependencies.len() - owned
                ));
            }
        }

        tally.finish(self)
    }
}

/// Explicit non-goals with rationale.
pub struct OutOfScopeScorer;

impl SectionScorer for OutOfScopeScorer {
    fn id(&self) -> &'static str {
        "out_of_scope"
    }

    fn name(&self) -> &'static str {
        "Out of Scope"
    }

    fn required(&self) -> bool {
        false
    }

    fn max_points(&self) -> f64 {
        1.0
    }

    fn guidance(&self) -> &'static str {
        "Name what this release will not do and why, so reviewers can hold the line on scope."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let items: Vec<_> = doc.out_of_scope.iter().filter(|i| filled(&i.item)).collect();
        if items.is_empty() {
            return absent(self, "State what is explicitly out of scope");
        }
        let mut tally = PointTally::new(4.0);

        tally.award(2.5);

        let explained = items.iter().filter(|i| filled(&i.rationale)).count();
        tally.award_any(1.5, explained);
        if explained < items.len() {
            tally.suggest(format!(
                "Explain why {} item(s) are out of scope",
                items.len() - explained
            ));
        }

        tally.finish(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgrade_core::{
        Assumptions, Competitor, Dependency, MarketContext, OutOfScopeItem, Risk, RiskLevel,
        SectionStatus, TechnicalConsiderations, UserFlow, UxDesign,
    };

    fn all_optional() -> Vec<Box<dyn SectionScorer>> {
        vec![
            Box::new(MarketContextScorer),
            Box::new(UxDesignScorer),
            Box::new(TechnicalScorer),
            Box::new(RisksScorer),
            Box::new(AssumptionsScorer),
            Box::new(OutOfScopeScorer),
        ]
    }

    #[test]
    fn test_absent_sections_suggest_once_and_never_issue() {
        let doc = PrdDocument::default();
        for scorer in all_optional() {
            let score = scorer.score(&doc);
            assert_eq!(score.score, 0.0, "{}", scorer.id());
            assert_eq!(score.status, SectionStatus::Missing);
            assert!(score.issues.is_empty(), "{}", scorer.id());
            assert_eq!(score.suggestions.len(), 1, "{}", scorer.id());
            assert!(!score.required);
        }
    }

    #[test]
    fn test_empty_struct_counts_as_absent() {
        let doc = PrdDocument {
            market_context: Some(MarketContext::default()),
            ux_design: Some(UxDesign::default()),
            assumptions: Some(Assumptions::default()),
            out_of_scope: vec![OutOfScopeItem::default()],
            ..Default::default()
        };
        assert_eq!(MarketContextScorer.score(&doc).suggestions.len(), 1);
        assert_eq!(UxDesignScorer.score(&doc).suggestions.len(), 1);
        assert_eq!(AssumptionsScorer.score(&doc).suggestions.len(), 1);
        assert_eq!(OutOfScopeScorer.score(&doc).score, 0.0);
    }

    #[test]
    fn test_market_context() {
        let doc = PrdDocument {
            market_context: Some(MarketContext {
                market_size: String::new(),
                competitors: vec![Competitor { name: "Acme".to_string(), ..Default::default() }],
                differentiation: "Native billing sync".to_string(),
            }),
            ..Default::default()
        };
        let score = MarketContextScorer.score(&doc);
        assert_eq!(score.score, 62.5);
        assert!(score.issues.is_empty());
        assert_eq!(score.suggestions, vec!["Estimate the market size".to_string()]);
    }

    #[test]
    fn test_ux_without_accessibility() {
        let doc = PrdDocument {
            ux_design: Some(UxDesign {
                principles: vec!["One screen".to_string()],
                user_flows: vec![UserFlow { name: "Refund".to_string() }],
                accessibility: String::new(),
            }),
            ..Default::default()
        };
        let score = UxDesignScorer.score(&doc);
        assert_eq!(score.score, 75.0);
        assert_eq!(
            score.issues,
            vec!["Accessibility requirements are not addressed".to_string()]
        );
    }

    #[test]
    fn test_technical_short_architecture() {
        let doc = PrdDocument {
            technical_considerations: Some(TechnicalConsiderations {
                architecture: "Queue + worker".to_string(),
                integrations: vec!["Stripe".to_string()],
                constraints: Vec::new(),
            }),
            ..Default::default()
        };
        let score = TechnicalScorer.score(&doc);
        assert_eq!(score.score, 50.0);
        assert_eq!(score.issues, vec!["Architecture overview is too brief".to_string()]);
        assert_eq!(score.suggestions.len(), 1);
    }

    #[test]
    fn test_unmitigated_risk_is_flagged() {
        let rated = |mitigation: &str| Risk {
            id: "R".to_string(),
            description: "Vendor outage".to_string(),
            likelihood: Some(RiskLevel::Low),
            impact: Some(RiskLevel::High),
            mitigation: mitigation.to_string(),
        };
        let doc = PrdDocument {
            risks: vec![rated("Fallback provider"), rated("")],
            ..Default::default()
        };
        let score = RisksScorer.score(&doc);
        // 1 + 2 + 0.5 of 4
        assert_eq!(score.score, 87.5);
        assert_eq!(score.issues, vec!["1 risk(s) have no mitigation".to_string()]);
    }

    #[test]
    fn test_assumptions_dependency_owners() {
        let doc = PrdDocument {
            assumptions: Some(Assumptions {
                assumptions: vec!["Billing API stays v2".to_string()],
                dependencies: vec![
                    Dependency { name: "Billing".to_string(), owner: "Payments".to_string() },
                    Dependency { name: "CRM".to_string(), ..Default::default() },
                ],
            }),
            ..Default::default()
        };
        let score = AssumptionsScorer.score(&doc);
        assert_eq!(score.score, 100.0);
        assert_eq!(score.status, SectionStatus::Complete);
        assert_eq!(score.issues, vec!["1 dependency(ies) have no owner".to_string()]);
    }

    #[test]
    fn test_out_of_scope_rationale() {
        let doc = PrdDocument {
            out_of_scope: vec![
                OutOfScopeItem { item: "Partial refunds".to_string(), rationale: "Phase 2".to_string() },
                OutOfScopeItem { item: "Crypto".to_string(), rationale: String::new() },
            ],
            ..Default::default()
        };
        let score = OutOfScopeScorer.score(&doc);
        assert_eq!(score.score, 100.0);
        assert!(score.issues.is_empty());
        assert_eq!(score.suggestions.len(), 1);
    }
}
