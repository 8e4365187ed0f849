//! # Relevance Scoring
//!
//! Ranks how pressing a scenario is for one country as an integer in
//! `[0, 100]`:
//!
//! | Term | Contribution |
//! |------|--------------|
//! | base | 50 |
//! | impact | `cultural_impact / 100 * 20` (up to 20) |
//! | urgency | 20 if under 24h to expiry, 10 if under 72h, else 0 |
//! | relationship | 15 if strength < 25, 10 if strength > 75, else 0 |
//! | preference | 15 if the scenario's type is the preferred type |
//!
//! The total is capped at 100 and rounded. Every term is non-negative, so
//! the result is never below 50.
//!
//! The relationship term uses the relationship between the scoring country
//! and the scenario's *other* party. The single-scenario and batch paths
//! share one formula; the mid band (25..=75) contributes nothing in both.

use serde::{Deserialize, Serialize};

use dipl_core::{CountryId, RelationshipState, ScenarioType, SharedClock, Timestamp};

use crate::scenario::{RelationshipContext, Scenario};

const BASE_SCORE: f64 = 50.0;
const IMPACT_WEIGHT: f64 = 20.0;
const URGENT_BONUS: f64 = 20.0;
const SOON_BONUS: f64 = 10.0;
const WEAK_RELATIONSHIP_BONUS: f64 = 15.0;
const STRONG_RELATIONSHIP_BONUS: f64 = 10.0;
const PREFERENCE_BONUS: f64 = 15.0;

/// A tracked relationship between two named countries, as supplied to the
/// batch scorer. Pair order is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub country_a: CountryId,
    pub country_b: CountryId,
    pub state: RelationshipState,
    pub strength: u8,
}

impl Relationship {
    /// Whether this relationship links `x` and `y`, in either order.
    pub fn connects(&self, x: &CountryId, y: &CountryId) -> bool {
        (self.country_a == *x && self.country_b == *y)
            || (self.country_a == *y && self.country_b == *x)
    }

    /// The relationship without its parties.
    pub fn context(&self) -> RelationshipContext {
        RelationshipContext {
            state: self.state,
            strength: self.strength,
        }
    }
}

/// Per-term contributions behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelevanceBreakdown {
    pub base: f64,
    pub impact: f64,
    pub urgency: f64,
    pub relationship: f64,
    pub preference: f64,
}

impl RelevanceBreakdown {
    /// Uncapped sum of all terms.
    pub fn sum(&self) -> f64 {
        self.base + self.impact + self.urgency + self.relationship + self.preference
    }

    /// Final score: `round(min(100, sum))`, clamped at 0.
    pub fn score(&self) -> u8 {
        self.sum().min(100.0).max(0.0).round() as u8
    }
}

/// The winning candidate of a batch ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedScenario<'a> {
    pub scenario: &'a Scenario,
    pub relevance_score: u8,
}

/// Scores scenarios against the injected clock.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    clock: SharedClock,
}

impl RelevanceScorer {
    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    /// Score `scenario` for `country_id`.
    ///
    /// `relationship` is the relationship between `country_id` and the
    /// scenario's other party, if one is tracked.
    pub fn score_relevance(
        &self,
        scenario: &Scenario,
        country_id: &CountryId,
        relationship: Option<&RelationshipContext>,
        preferred_type: Option<ScenarioType>,
    ) -> u8 {
        let breakdown = self.breakdown(scenario, relationship, preferred_type);
        let score = breakdown.score();
        tracing::trace!(
            scenario_id = %scenario.id,
            country = %country_id,
            score,
            "scored scenario relevance"
        );
        score
    }

    /// Per-term contributions for `scenario`, evaluated at the clock's now.
    pub fn breakdown(
        &self,
        scenario: &Scenario,
        relationship: Option<&RelationshipContext>,
        preferred_type: Option<ScenarioType>,
    ) -> RelevanceBreakdown {
        compute(self.clock.now(), scenario, relationship, preferred_type)
    }

    /// Score every candidate and return the highest. Ties go to the earliest
    /// candidate. Returns `None` for an empty list.
    pub fn select_most_relevant<'a>(
        &self,
        scenarios: &'a [Scenario],
        country_id: &CountryId,
        relationships: &[Relationship],
        preferred_type: Option<ScenarioType>,
    ) -> Option<RankedScenario<'a>> {
        let now = self.clock.now();
        let mut best: Option<RankedScenario<'a>> = None;

        for scenario in scenarios {
            let context = scenario
                .other_party(country_id)
                .and_then(|other| relationships.iter().find(|r| r.connects(country_id, other)))
                .map(Relationship::context);
            let relevance_score =
                compute(now, scenario, context.as_ref(), preferred_type).score();

            if best.map_or(true, |b| relevance_score > b.relevance_score) {
                best = Some(RankedScenario {
                    scenario,
                    relevance_score,
                });
            }
        }

        if let Some(b) = &best {
            tracing::debug!(
                country = %country_id,
                candidates = scenarios.len(),
                scenario_id = %b.scenario.id,
                score = b.relevance_score,
                "selected most relevant scenario"
            );
        }
        best
    }
}

fn compute(
    now: Timestamp,
    scenario: &Scenario,
    relationship: Option<&RelationshipContext>,
    preferred_type: Option<ScenarioType>,
) -> RelevanceBreakdown {
    let impact = f64::from(scenario.cultural_impact) / 100.0 * IMPACT_WEIGHT;

    let hours_to_expiry = now.hours_until(scenario.expires_at);
    let urgency = if hours_to_expiry < 24.0 {
        URGENT_BONUS
    } else if hours_to_expiry < 72.0 {
        SOON_BONUS
    } else {
        0.0
    };

    let relationship = match relationship {
        Some(r) if r.strength > 75 => STRONG_RELATIONSHIP_BONUS,
        Some(r) if r.strength < 25 => WEAK_RELATIONSHIP_BONUS,
        _ => 0.0,
    };

    let preference = match preferred_type {
        Some(t) if t == scenario.scenario_type => PREFERENCE_BONUS,
        _ => 0.0,
    };

    RelevanceBreakdown {
        base: BASE_SCORE,
        impact,
        urgency,
        relationship,
        preference,
    }
}
