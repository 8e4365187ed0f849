//! # Scenario Factory
//!
//! Synthesizes a fully formed, unpersisted [`Scenario`] from two countries
//! and an optional relationship snapshot. Title and narrative come from a
//! fixed per-type template table; impact figures are uniform draws from
//! fixed ranges; the option menu is a fixed base set of three, plus a
//! fourth `friendly` option when the relationship is strong.
//!
//! ## Draw order
//!
//! Random draws are consumed in this order, which tests rely on:
//!
//! 1. scenario type (only when the request names none)
//! 2. `cultural_impact` in `[40, 70]`
//! 3. `diplomatic_risk` in `[30, 70]`
//! 4. `economic_cost` in `[20, 70]`
//!
//! The factory has no side effects. Persisting the scenario and sending the
//! creation notification are the caller's responsibility.

use serde::{Deserialize, Serialize};

use dipl_core::{
    ChoiceId, CountryId, Difficulty, RandomSource, ScenarioId, ScenarioType, SharedClock,
    TimeFrame,
};

use crate::config::FactoryConfig;
use crate::error::ScenarioError;
use crate::scenario::{
    Choice, ChoiceEffects, PredictedOutcomes, RelationshipContext, Scenario, ScenarioStatus,
    ScenarioTags,
};
use crate::templates::{self, OptionTemplate};

const CULTURAL_IMPACT_RANGE: (u8, u8) = (40, 70);
const DIPLOMATIC_RISK_RANGE: (u8, u8) = (30, 70);
const ECONOMIC_COST_RANGE: (u8, u8) = (20, 70);

/// A country as the factory needs it: identity plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    pub id: CountryId,
    pub name: String,
}

impl CountryRef {
    pub fn new(id: CountryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Inputs to [`ScenarioFactory::create_scenario`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub country1: CountryRef,
    pub country2: CountryRef,
    /// Defaults to neutral / 50 when absent.
    #[serde(default)]
    pub relationship: Option<RelationshipContext>,
    /// Drawn from the configured randomizable set when absent.
    #[serde(default)]
    pub scenario_type: Option<ScenarioType>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub time_frame: Option<TimeFrame>,
}

impl ScenarioRequest {
    /// A request with every optional field left to its default.
    pub fn between(country1: CountryRef, country2: CountryRef) -> Self {
        Self {
            country1,
            country2,
            relationship: None,
            scenario_type: None,
            difficulty: None,
            time_frame: None,
        }
    }

    pub fn with_relationship(mut self, relationship: RelationshipContext) -> Self {
        self.relationship = Some(relationship);
        self
    }

    pub fn with_type(mut self, scenario_type: ScenarioType) -> Self {
        self.scenario_type = Some(scenario_type);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_time_frame(mut self, time_frame: TimeFrame) -> Self {
        self.time_frame = Some(time_frame);
        self
    }
}

/// Builds scenarios. Owns its random source so draws are reproducible when
/// the source is seeded or scripted.
#[derive(Debug)]
pub struct ScenarioFactory<R: RandomSource> {
    config: FactoryConfig,
    clock: SharedClock,
    rng: R,
}

impl<R: RandomSource> ScenarioFactory<R> {
    /// Create a factory.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::InvalidInput`] if `config` fails validation.
    pub fn new(config: FactoryConfig, clock: SharedClock, rng: R) -> Result<Self, ScenarioError> {
        config.validate()?;
        Ok(Self { config, clock, rng })
    }

    /// The active configuration.
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Synthesize a new scenario in the `Active` state.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::InvalidInput`] if both countries are the
    /// same, or if the supplied relationship strength exceeds 100.
    pub fn create_scenario(&mut self, request: ScenarioRequest) -> Result<Scenario, ScenarioError> {
        let ScenarioRequest {
            country1,
            country2,
            relationship,
            scenario_type,
            difficulty,
            time_frame,
        } = request;

        if country1.id == country2.id {
            return Err(ScenarioError::InvalidInput {
                reason: format!(
                    "a scenario needs two distinct countries, got {} twice",
                    country1.id
                ),
            });
        }
        let relationship = relationship.unwrap_or_default();
        if relationship.strength > 100 {
            return Err(ScenarioError::InvalidInput {
                reason: format!("relationship strength {} exceeds 100", relationship.strength),
            });
        }

        let scenario_type = match scenario_type {
            Some(t) => t,
            None => {
                let pool = &self.config.randomizable_types;
                pool[self.rng.pick(pool.len())]
            }
        };
        let difficulty = difficulty.unwrap_or(self.config.default_difficulty);
        let time_frame = time_frame.unwrap_or(self.config.default_time_frame);

        let cultural_impact = self.draw(CULTURAL_IMPACT_RANGE);
        let diplomatic_risk = self.draw(DIPLOMATIC_RISK_RANGE);
        let economic_cost = self.draw(ECONOMIC_COST_RANGE);

        let template = templates::narrative_for(scenario_type).unwrap_or(&templates::GENERIC);
        let title = templates::render(template.title, &country1.name, &country2.name);
        let narrative = templates::render(template.narrative, &country1.name, &country2.name);

        let response_options = self.response_options(
            scenario_type,
            relationship.strength,
            &country1.name,
            &country2.name,
        )?;

        let now = self.clock.now();
        let scenario = Scenario {
            id: ScenarioId::new(),
            scenario_type,
            title,
            narrative,
            country1_id: country1.id,
            country2_id: country2.id,
            country1_name: country1.name,
            country2_name: country2.name,
            relationship_state: relationship.state,
            relationship_strength: relationship.strength,
            response_options,
            tags: ScenarioTags {
                difficulty,
                time_frame,
                extra: Vec::new(),
            },
            cultural_impact,
            diplomatic_risk,
            economic_cost,
            actual_cultural_impact: None,
            actual_diplomatic_impact: None,
            actual_economic_cost: None,
            chosen_option: None,
            outcome_notes: None,
            status: ScenarioStatus::Active,
            created_at: now,
            expires_at: now.plus_days(time_frame.days()),
            resolved_at: None,
            transitions: Vec::new(),
        };

        tracing::debug!(
            scenario_id = %scenario.id,
            scenario_type = %scenario.scenario_type,
            options = scenario.response_options.len(),
            expires_at = %scenario.expires_at,
            "synthesized scenario"
        );
        Ok(scenario)
    }

    fn draw(&mut self, (min, max): (u8, u8)) -> u8 {
        self.rng.int_in_range(min, max)
    }

    fn response_options(
        &self,
        scenario_type: ScenarioType,
        strength: u8,
        country1: &str,
        country2: &str,
    ) -> Result<Vec<Choice>, ScenarioError> {
        let friendly = strength > self.config.friendly_option_threshold;
        templates::BASE_OPTIONS
            .iter()
            .chain(friendly.then_some(&templates::FRIENDLY_OPTION))
            .map(|t| build_choice(t, scenario_type, country1, country2))
            .collect()
    }
}

fn build_choice(
    template: &OptionTemplate,
    scenario_type: ScenarioType,
    country1: &str,
    country2: &str,
) -> Result<Choice, ScenarioError> {
    let [short_term, medium_term, long_term] =
        template.outcomes.map(|o| templates::render(o, country1, country2));
    Ok(Choice {
        id: ChoiceId::namespaced(scenario_type.as_str(), template.suffix)?,
        label: template.label.to_string(),
        description: templates::render(template.description, country1, country2),
        skill_required: template.skill_required.to_string(),
        skill_level: template.skill_level,
        risk_level: template.risk_level,
        effects: ChoiceEffects {
            relationship_change: template.relationship_change,
            economic_impact: template.economic_impact,
            reputation_change: template.reputation_change,
            cultural_impact: Some(template.cultural_impact),
            custom_effects: Default::default(),
        },
        predicted_outcomes: PredictedOutcomes {
            short_term,
            medium_term,
            long_term,
        },
    })
}
