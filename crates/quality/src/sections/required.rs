//! Scorers for the required PRD sections.

use std::sync::OnceLock;

use docgrade_core::{PrdDocument, SectionScore, UserStory};
use regex::Regex;

use super::{char_len, filled, filled_count, PointTally, SectionScorer, MIN_PARAGRAPH_CHARS};

/// Document metadata: title, authors, version, status, stakeholders.
pub struct MetadataScorer;

impl SectionScorer for MetadataScorer {
    fn id(&self) -> &'static str {
        "metadata"
    }

    fn name(&self) -> &'static str {
        "Metadata"
    }

    fn required(&self) -> bool {
        true
    }

    fn max_points(&self) -> f64 {
        10.0
    }

    fn guidance(&self) -> &'static str {
        "Give the document a title, a version, named authors, and the stakeholders who approve it."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let meta = &doc.metadata;
        let mut tally = PointTally::new(5.0);

        if filled(&meta.title) {
            tally.award(1.5);
        } else {
            tally.issue("Document title is missing");
        }

        if meta.authors.iter().any(|a| filled(&a.name)) {
            tally.award(1.5);
        } else {
            tally.issue("No authors listed");
        }

        if filled(&meta.version) {
            tally.award(1.0);
        } else {
            tally.issue("Document version is not set");
        }

        if meta.status.is_some() {
            tally.award(0.5);
        } else {
            tally.suggest("Set a document status (draft, in review, approved)");
        }

        if meta.stakeholders.iter().any(|s| filled(&s.name)) {
            tally.award(0.5);
        } else {
            tally.suggest("List the stakeholders who must sign off");
        }

        tally.finish(self)
    }
}

/// Problem statement: the statement itself, its impact, and evidence.
pub struct ProblemStatementScorer;

impl SectionScorer for ProblemStatementScorer {
    fn id(&self) -> &'static str {
        "problem_statement"
    }

    fn name(&self) -> &'static str {
        "Problem Statement"
    }

    fn required(&self) -> bool {
        true
    }

    fn max_points(&self) -> f64 {
        25.0
    }

    fn guidance(&self) -> &'static str {
        "Describe who has the problem, how often, and what it costs them, backed by data."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let problem = &doc.problem_statement;
        let mut tally = PointTally::new(5.0);

        let len = char_len(&problem.statement);
        if len >= MIN_PARAGRAPH_CHARS {
            tally.award(3.0);
        } else if len > 0 {
            tally.award(1.5);
            tally.issue(format!(
                "Problem statement is too brief ({} characters, aim for at least {})",
                len, MIN_PARAGRAPH_CHARS
            ));
        } else {
            tally.issue("Problem statement is missing");
        }

        if filled(&problem.impact) {
            tally.award(1.0);
        } else {
            tally.issue("Impact of the problem is not described");
        }

        if filled_count(&problem.evidence) > 0 {
            tally.award(0.5);
        } else {
            tally.suggest("Back the problem with evidence such as data, research, or support tickets");
        }

        if filled(&problem.target_audience) {
            tally.award(0.5);
        } else {
            tally.suggest("Name the target audience");
        }

        tally.finish(self)
    }
}

/// Goals with key results and targets.
pub struct ObjectivesScorer;

impl SectionScorer for ObjectivesScorer {
    fn id(&self) -> &'static str {
        "objectives"
    }

    fn name(&self) -> &'static str {
        "Goals & Objectives"
    }

    fn required(&self) -> bool {
        true
    }

    fn max_points(&self) -> f64 {
        5.0
    }

    fn guidance(&self) -> &'static str {
        "State each objective with at least one key result that has a baseline and a numeric target."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let goals = &doc.objectives.goals;
        let mut tally = PointTally::new(5.0);

        if goals.is_empty() {
            tally.issue("No objectives defined");
            return tally.finish(self);
        }

        tally.award(if goals.len() >= 2 { 1.5 } else { 1.0 });

        let with_key_results = goals.iter().filter(|g| !g.key_results.is_empty()).count();
        tally.award_any(1.5, with_key_results);
        if with_key_results < goals.len() {
            tally.issue(format!(
                "{} of {} objective(s) have no key results",
                goals.len() - with_key_results,
                goals.len()
            ));
        }

        let key_results: Vec<_> = goals.iter().flat_map(|g| g.key_results.iter()).collect();
        let with_target = key_results.iter().filter(|kr| kr.has_target()).count();
        tally.award_any(2.0, with_target);
        if with_target < key_results.len() {
            tally.issue(format!(
                "{} of {} key result(s) have no target",
                key_results.len() - with_target,
                key_results.len()
            ));
        }

        tally.finish(self)
    }
}

/// Personas with goals, pain points, and a description.
pub struct PersonasScorer;

impl SectionScorer for PersonasScorer {
    fn id(&self) -> &'static str {
        "personas"
    }

    fn name(&self) -> &'static str {
        "User Personas"
    }

    fn required(&self) -> bool {
        true
    }

    fn max_points(&self) -> f64 {
        20.0
    }

    fn guidance(&self) -> &'static str {
        "Describe each persona with their role, goals, and pain points."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let personas = &doc.personas;
        let mut tally = PointTally::new(5.0);

        if personas.is_empty() {
            tally.issue("No personas defined");
            return tally.finish(self);
        }

        if personas.len() >= 2 {
            tally.award(2.0);
        } else {
            tally.award(1.5);
            tally.suggest("Consider adding a secondary persona");
        }

        let total = personas.len();
        let with_goals = personas.iter().filter(|p| filled_count(&p.goals) > 0).count();
        let with_pain = personas.iter().filter(|p| filled_count(&p.pain_points) > 0).count();
        let described = personas.iter().filter(|p| filled(&p.description)).count();

        tally.award_any(1.0, with_goals);
        tally.award_any(1.0, with_pain);
        tally.award_any(1.0, described);

        if with_goals < total {
            tally.issue(format!("{} persona(s) have no goals", total - with_goals));
        }
        if with_pain < total {
            tally.issue(format!("{} persona(s) have no pain points", total - with_pain));
        }
        if described < total {
            tally.issue(format!("{} persona(s) have no description", total - described));
        }

        tally.finish(self)
    }
}

fn story_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"(?is)^\s*as an?\s+\S.*?\bi\s+want\s+\S.*?\bso\s+that\s+\S").ok()
        })
        .as_ref()
}

/// Whether a story names a role, a want, and a benefit.
pub(crate) fn is_well_formed(story: &UserStory) -> bool {
    if filled(&story.as_a) && filled(&story.i_want) && filled(&story.so_that) {
        return true;
    }
    story_pattern().is_some_and(|re| re.is_match(&story.statement))
}

/// User stories: form, acceptance criteria, persona links.
pub struct UserStoriesScorer;

impl SectionScorer for UserStoriesScorer {
    fn id(&self) -> &'static str {
        "user_stories"
    }

    fn name(&self) -> &'static str {
        "User Stories"
    }

    fn required(&self) -> bool {
        true
    }

    fn max_points(&self) -> f64 {
        5.0
    }

    fn guidance(&self) -> &'static str {
        "Write stories as 'As a <persona>, I want <goal> so that <benefit>' with testable acceptance criteria."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let stories = &doc.user_stories;
        let mut tally = PointTally::new(6.0);

        if stories.is_empty() {
            tally.issue("No user stories defined");
            return tally.finish(self);
        }

        let total = stories.len();
        tally.award(if total >= 3 { 2.0 } else { 1.0 });

        let well_formed = stories.iter().filter(|s| is_well_formed(s)).count();
        tally.award_any(1.5, well_formed);
        if well_formed < total {
            tally.issue(format!(
                "{} story(ies) not in 'As a ..., I want ... so that ...' form",
                total - well_formed
            ));
        }

        let with_criteria = stories
            .iter()
            .filter(|s| filled_count(&s.acceptance_criteria) > 0)
            .count();
        tally.award_any(1.5, with_criteria);
        if with_criteria < total {
            tally.issue(format!(
                "{} story(ies) have no acceptance criteria",
                total - with_criteria
            ));
        }

        let mut linked = 0;
        let mut unlinked = 0;
        for story in stories {
            match story.persona_id.as_deref().filter(|id| filled(id)) {
                Some(persona_id) if doc.persona(persona_id).is_some() => linked += 1,
                Some(persona_id) => tally.issue(format!(
                    "Story {} references unknown persona '{}'",
                    story.id, persona_id
                )),
                None => unlinked += 1,
            }
        }
        tally.award_any(1.0, linked);
        if unlinked > 0 {
            tally.suggest(format!("Link {} story(ies) to a persona", unlinked));
        }

        tally.finish(self)
    }
}

/// Functional and non-functional requirements, priorities, traceability.
pub struct RequirementsScorer;

impl SectionScorer for RequirementsScorer {
    fn id(&self) -> &'static str {
        "requirements"
    }

    fn name(&self) -> &'static str {
        "Requirements"
    }

    fn required(&self) -> bool {
        true
    }

    fn max_points(&self) -> f64 {
        4.0
    }

    fn guidance(&self) -> &'static str {
        "Prioritize every requirement, trace it to a user story, and add measurable non-functional targets."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let functional = &doc.requirements.functional;
        let non_functional = &doc.requirements.non_functional;
        let mut tally = PointTally::new(6.0);

        if functional.is_empty() {
            tally.issue("No functional requirements defined");
        } else {
            let total = functional.len();
            tally.award(if total >= 3 { 2.0 } else { 1.5 });

            let prioritized = functional.iter().filter(|r| r.priority.is_some()).count();
            tally.award_any(1.0, prioritized);
            if prioritized < total {
                tally.issue(format!("{} requirement(s) have no priority", total - prioritized));
            }

            let mut traced = 0;
            let mut untraced = 0;
            for requirement in functional {
                if requirement.story_ids.is_empty() {
                    untraced += 1;
                    continue;
                }
                let mut resolves = true;
                for story_id in &requirement.story_ids {
                    if doc.story(story_id).is_none() {
                        resolves = false;
                        tally.issue(format!(
                            "Requirement {} references unknown story '{}'",
                            requirement.id, story_id
                        ));
                    }
                }
                if resolves {
                    traced += 1;
                }
            }
            tally.award_any(1.0, traced);
            if untraced > 0 {
                tally.suggest(format!("Trace {} requirement(s) to user stories", untraced));
            }
        }

        if non_functional.is_empty() {
            tally.issue("No non-functional requirements (performance, security, reliability)");
        } else {
            tally.award(1.0);
            let with_target = non_functional
                .iter()
                .filter(|n| n.target.as_deref().is_some_and(filled))
                .count();
            tally.award_any(1.0, with_target);
            if with_target < non_functional.len() {
                tally.suggest(format!(
                    "Give {} non-functional requirement(s) a measurable target",
                    non_functional.len() - with_target
                ));
            }
        }

        tally.finish(self)
    }
}

/// Roadmap phases with deliverables, success criteria, and timeframes.
pub struct RoadmapScorer;

impl SectionScorer for RoadmapScorer {
    fn id(&self) -> &'static str {
        "roadmap"
    }

    fn name(&self) -> &'static str {
        "Roadmap"
    }

    fn required(&self) -> bool {
        true
    }

    fn max_points(&self) -> f64 {
        25.0
    }

    fn guidance(&self) -> &'static str {
        "Break delivery into phases, each with deliverables, success criteria, and a timeframe."
    }

    fn score(&self, doc: &PrdDocument) -> SectionScore {
        let phases = &doc.roadmap.phases;
        let mut tally = PointTally::new(5.0);

        if phases.is_empty() {
            tally.issue("No roadmap phases defined");
            return tally.finish(self);
        }

        let total = phases.len();
        tally.award(if total >= 2 { 2.0 } else { 1.5 });

        let with_deliverables = phases.iter().filter(|p| filled_count(&p.deliverables) > 0).count();
        tally.award_any(1.5, with_deliverables);
        if with_deliverables < total {
            tally.issue(format!("{} phase(s) have no deliverables", total - with_deliverables));
        }

        let with_criteria = phases
            .iter()
            .filter(|p| filled_count(&p.success_criteria) > 0)
            .count();
        tally.award_any(1.5, with_criteria);
        if with_criteria < total {
            tally.issue(format!("{} phase(s) have no success criteria", total - with_criteria));
        }

        // Bonus, may push the tally past the budget
        let timed = phases
            .iter()
            .filter(|p| p.timeframe.as_deref().is_some_and(filled))
            .count();
        tally.award_any(0.5, timed);
        if timed < total {
            tally.suggest(format!("Add a timeframe to {} phase(s)", total - timed));
        }

        for phase in phases {
            for requirement_id in &phase.requirement_ids {
                if doc.requirement(requirement_id).is_none() {
                    tally.issue(format!(
                        "Phase {} references unknown requirement '{}'",
                        phase.id, requirement_id
                    ));
                }
            }
        }

        tally.finish(self)
    }
}
