//! # Scenario Data Model
//!
//! A [`Scenario`] is one diplomatic situation between two countries, with a
//! bounded lifetime and a menu of [`Choice`] values. It is created once by
//! the factory and is immutable afterwards except for its status, its
//! resolution fields, and its outcome fields.
//!
//! ## Invariants
//!
//! - `country1_id != country2_id`.
//! - `status == Completed` ⇔ `resolved_at` and `chosen_option` are set.
//! - Impact figures and relationship strength lie in `[0, 100]`.
//!
//! [`Scenario::validate()`] checks these on values read back from storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dipl_core::{
    ChoiceId, CountryId, Difficulty, RelationshipState, RiskLevel, ScenarioId, ScenarioType,
    TimeFrame, Timestamp,
};

use crate::error::ScenarioError;

// ─── Status ──────────────────────────────────────────────────────────

/// Lifecycle status of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Open for a response. Initial state.
    Active,
    /// Open for a response; equivalent to `Active` for transitions.
    Pending,
    /// A choice was recorded (terminal).
    Completed,
    /// The deadline passed without a response (terminal).
    Expired,
    /// Withdrawn by an administrator (terminal).
    Declined,
}

impl ScenarioStatus {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Expired | Self::Declined)
    }

    /// Whether the scenario still accepts a response.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Active | Self::Pending)
    }

    /// The snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Expired => "expired",
            Self::Declined => "declined",
        }
    }
}

impl std::fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Choices ─────────────────────────────────────────────────────────

/// Numeric effects of picking a choice.
///
/// `relationship_change`, `economic_impact`, and `reputation_change` are
/// always produced by the factory. `cultural_impact` is optional; the
/// lifecycle controller treats it as 0 when absent. Keys the engine does not
/// know about are kept in `custom_effects` so stored rows round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceEffects {
    #[serde(default)]
    pub relationship_change: i32,
    #[serde(default)]
    pub economic_impact: i32,
    #[serde(default)]
    pub reputation_change: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_impact: Option<i32>,
    #[serde(flatten)]
    pub custom_effects: BTreeMap<String, i32>,
}

/// Narrative hints shown with a choice. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedOutcomes {
    pub short_term: String,
    pub medium_term: String,
    pub long_term: String,
}

/// One selectable response option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Unique within the owning scenario's option list.
    pub id: ChoiceId,
    pub label: String,
    pub description: String,
    /// Free-form skill tag, e.g. `negotiation`.
    pub skill_required: String,
    pub skill_level: u8,
    pub risk_level: RiskLevel,
    pub effects: ChoiceEffects,
    #[serde(default)]
    pub predicted_outcomes: PredictedOutcomes,
}

// ─── Supporting records ──────────────────────────────────────────────

/// Relationship snapshot between two countries, as supplied by the
/// relationship-tracking collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipContext {
    pub state: RelationshipState,
    /// Bilateral closeness in `[0, 100]`.
    pub strength: u8,
}

impl RelationshipContext {
    /// Strength used when no relationship is known.
    pub const NEUTRAL_STRENGTH: u8 = 50;

    /// The snapshot assumed when none is supplied.
    pub fn neutral() -> Self {
        Self {
            state: RelationshipState::Neutral,
            strength: Self::NEUTRAL_STRENGTH,
        }
    }
}

impl Default for RelationshipContext {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Classification tags recorded at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioTags {
    pub difficulty: Difficulty,
    pub time_frame: TimeFrame,
    /// Additional free-form labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl ScenarioTags {
    /// Flattened label list: `[type, difficulty, time_frame, extra...]`.
    pub fn labels(&self, scenario_type: ScenarioType) -> Vec<String> {
        let mut labels = vec![
            scenario_type.to_string(),
            self.difficulty.to_string(),
            self.time_frame.to_string(),
        ];
        labels.extend(self.extra.iter().cloned());
        labels
    }
}

/// Structured notes recorded when a choice is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeNotes {
    pub choice_label: String,
    pub timestamp: Timestamp,
    /// The country that recorded the choice.
    pub country_id: CountryId,
}

/// Record of a scenario status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioTransitionRecord {
    pub from_state: ScenarioStatus,
    pub to_state: ScenarioStatus,
    pub timestamp: Timestamp,
    /// Country that caused the transition; `None` for deadline sweeps.
    pub actor: Option<CountryId>,
}

// ─── Scenario ────────────────────────────────────────────────────────

/// A diplomatic situation between two countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    #[serde(rename = "type")]
    pub scenario_type: ScenarioType,
    pub title: String,
    pub narrative: String,

    pub country1_id: CountryId,
    pub country2_id: CountryId,
    pub country1_name: String,
    pub country2_name: String,

    /// Relationship snapshot taken at creation.
    pub relationship_state: RelationshipState,
    pub relationship_strength: u8,

    pub response_options: Vec<Choice>,
    pub tags: ScenarioTags,

    pub cultural_impact: u8,
    pub diplomatic_risk: u8,
    pub economic_cost: u8,

    #[serde(default)]
    pub actual_cultural_impact: Option<i32>,
    #[serde(default)]
    pub actual_diplomatic_impact: Option<i32>,
    #[serde(default)]
    pub actual_economic_cost: Option<i32>,
    #[serde(default)]
    pub chosen_option: Option<ChoiceId>,
    #[serde(default)]
    pub outcome_notes: Option<OutcomeNotes>,

    pub status: ScenarioStatus,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,

    /// Ordered log of status transitions.
    #[serde(default)]
    pub transitions: Vec<ScenarioTransitionRecord>,
}

impl Scenario {
    /// Whether `country` is one of the two parties.
    pub fn involves(&self, country: &CountryId) -> bool {
        self.country1_id == *country || self.country2_id == *country
    }

    /// The party that is not `country`, or `None` if `country` is not a party.
    pub fn other_party(&self, country: &CountryId) -> Option<&CountryId> {
        if self.country1_id == *country {
            Some(&self.country2_id)
        } else if self.country2_id == *country {
            Some(&self.country1_id)
        } else {
            None
        }
    }

    /// The option with the given id.
    pub fn find_choice(&self, id: &ChoiceId) -> Option<&Choice> {
        self.response_options.iter().find(|c| c.id == *id)
    }

    /// Whether the deadline has strictly passed at `now`.
    pub fn is_past_deadline(&self, now: Timestamp) -> bool {
        self.expires_at < now
    }

    /// High-stakes scenarios earn boosted rewards downstream.
    pub fn is_high_stakes(&self) -> bool {
        self.cultural_impact > 70 || self.diplomatic_risk > 70
    }

    /// Check the structural invariants of a scenario read from storage.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let invalid = |reason: String| Err(ScenarioError::InvalidInput { reason });

        if self.country1_id == self.country2_id {
            return invalid(format!(
                "scenario {} has identical parties {}",
                self.id, self.country1_id
            ));
        }
        for (name, value) in [
            ("relationship_strength", self.relationship_strength),
            ("cultural_impact", self.cultural_impact),
            ("diplomatic_risk", self.diplomatic_risk),
            ("economic_cost", self.economic_cost),
        ] {
            if value > 100 {
                return invalid(format!("scenario {}: {name} {value} exceeds 100", self.id));
            }
        }
        let resolved = self.resolved_at.is_some() && self.chosen_option.is_some();
        if (self.status == ScenarioStatus::Completed) != resolved {
            return invalid(format!(
                "scenario {} is {} but resolution fields are {}",
                self.id,
                self.status,
                if resolved { "set" } else { "unset" }
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for choice in &self.response_options {
            if !seen.insert(&choice.id) {
                return invalid(format!(
                    "scenario {} lists choice {} twice",
                    self.id, choice.id
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminal_and_open() {
        assert!(ScenarioStatus::Active.is_open());
        assert!(ScenarioStatus::Pending.is_open());
        for s in [
            ScenarioStatus::Completed,
            ScenarioStatus::Expired,
            ScenarioStatus::Declined,
        ] {
            assert!(s.is_terminal());
            assert!(!s.is_open());
        }
    }

    #[test]
    fn test_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&ScenarioStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(ScenarioStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_effects_missing_keys_default() {
        let effects: ChoiceEffects =
            serde_json::from_str(r#"{"relationship_change": -5, "legacy_bonus": 2}"#).unwrap();
        assert_eq!(effects.relationship_change, -5);
        assert_eq!(effects.economic_impact, 0);
        assert_eq!(effects.cultural_impact, None);
        assert_eq!(effects.custom_effects.get("legacy_bonus"), Some(&2));
    }

    #[test]
    fn test_tags_labels() {
        let tags = ScenarioTags {
            difficulty: Difficulty::Moderate,
            time_frame: TimeFrame::Strategic,
            extra: vec!["summit".into()],
        };
        assert_eq!(
            tags.labels(ScenarioType::BorderDispute),
            vec!["border_dispute", "moderate", "strategic", "summit"]
        );
    }

    #[test]
    fn test_neutral_relationship() {
        let r = RelationshipContext::default();
        assert_eq!(r.state, RelationshipState::Neutral);
        assert_eq!(r.strength, 50);
    }
}
