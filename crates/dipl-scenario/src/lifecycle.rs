//! # Scenario Lifecycle Controller
//!
//! Validates and applies the two legal transitions out of an open scenario.
//!
//! ## Transitions
//!
//! ```text
//! ACTIVE / PENDING ──record_choice()──▶ COMPLETED
//! ACTIVE / PENDING ──expire()─────────▶ EXPIRED     (only once now ≥ expires_at)
//! EXPIRED          ──expire()─────────▶ EXPIRED     (no-op)
//! ```
//!
//! Every other call fails with a typed [`ScenarioError`]. There is no
//! transition out of a terminal state.
//!
//! The status is an enum checked at runtime, not a typestate. Both
//! operations take a snapshot and return a new value; the input is never
//! mutated, so a rejected transition leaves the caller's copy intact.

use dipl_core::{ChoiceId, CountryId, SharedClock, Timestamp};

use crate::error::ScenarioError;
use crate::scenario::{
    Choice, ChoiceEffects, OutcomeNotes, Scenario, ScenarioStatus, ScenarioTransitionRecord,
};

/// The result of a successful [`LifecycleController::record_choice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceResolution {
    /// The scenario in its `Completed` state.
    pub scenario: Scenario,
    /// The option that was chosen.
    pub choice: Choice,
    /// Effects of the chosen option, for the caller to forward to any
    /// reward or economy system.
    pub effects: ChoiceEffects,
}

/// Applies lifecycle transitions against the injected clock.
#[derive(Debug, Clone)]
pub struct LifecycleController {
    clock: SharedClock,
}

impl LifecycleController {
    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    /// Resolve an open scenario with one of its options (→ COMPLETED).
    ///
    /// Checks, in order:
    ///
    /// 1. status is `Active` or `Pending`, else [`ScenarioError::InvalidState`];
    /// 2. `expires_at` has not passed, else [`ScenarioError::Expired`], even
    ///    if no sweep has flipped the status yet;
    /// 3. `choice_id` is on the option list, else [`ScenarioError::UnknownChoice`].
    pub fn record_choice(
        &self,
        scenario: &Scenario,
        choice_id: &ChoiceId,
        resolving_country: &CountryId,
    ) -> Result<ChoiceResolution, ScenarioError> {
        let now = self.clock.now();
        self.require_open(scenario, ScenarioStatus::Completed)?;

        if scenario.is_past_deadline(now) {
            tracing::warn!(
                scenario_id = %scenario.id,
                expires_at = %scenario.expires_at,
                "choice rejected: scenario past deadline"
            );
            return Err(ScenarioError::Expired {
                scenario_id: scenario.id,
                expires_at: scenario.expires_at,
                now,
            });
        }

        let choice = scenario
            .find_choice(choice_id)
            .ok_or_else(|| ScenarioError::UnknownChoice {
                scenario_id: scenario.id,
                choice_id: choice_id.clone(),
            })?;
        let choice = choice.clone();
        let effects = choice.effects.clone();

        let mut updated = scenario.clone();
        updated.actual_cultural_impact = Some(effects.cultural_impact.unwrap_or(0));
        updated.actual_diplomatic_impact = Some(effects.relationship_change);
        updated.actual_economic_cost = Some(effects.economic_impact);
        updated.chosen_option = Some(choice_id.clone());
        updated.outcome_notes = Some(OutcomeNotes {
            choice_label: choice.label.clone(),
            timestamp: now,
            country_id: resolving_country.clone(),
        });
        updated.resolved_at = Some(now);
        apply(&mut updated, ScenarioStatus::Completed, now, Some(resolving_country.clone()));

        tracing::info!(
            scenario_id = %updated.id,
            choice = %choice_id,
            country = %resolving_country,
            "scenario resolved"
        );
        Ok(ChoiceResolution {
            scenario: updated,
            choice,
            effects,
        })
    }

    /// Expire an open scenario whose deadline has been reached (→ EXPIRED).
    ///
    /// Idempotent: an already expired scenario is returned unchanged.
    ///
    /// # Errors
    ///
    /// [`ScenarioError::InvalidState`] if the scenario is completed or
    /// declined, or if it is open but `now < expires_at`.
    pub fn expire(&self, scenario: &Scenario) -> Result<Scenario, ScenarioError> {
        if scenario.status == ScenarioStatus::Expired {
            return Ok(scenario.clone());
        }
        self.require_open(scenario, ScenarioStatus::Expired)?;

        let now = self.clock.now();
        if now < scenario.expires_at {
            tracing::warn!(
                scenario_id = %scenario.id,
                expires_at = %scenario.expires_at,
                "expiry rejected: deadline not reached"
            );
            return Err(ScenarioError::InvalidState {
                scenario_id: scenario.id,
                status: scenario.status,
                attempted: ScenarioStatus::Expired,
            });
        }

        let mut updated = scenario.clone();
        apply(&mut updated, ScenarioStatus::Expired, now, None);
        tracing::info!(scenario_id = %updated.id, "scenario expired");
        Ok(updated)
    }

    fn require_open(
        &self,
        scenario: &Scenario,
        attempted: ScenarioStatus,
    ) -> Result<(), ScenarioError> {
        if scenario.status.is_open() {
            return Ok(());
        }
        tracing::warn!(
            scenario_id = %scenario.id,
            status = %scenario.status,
            attempted = %attempted,
            "transition rejected"
        );
        Err(ScenarioError::InvalidState {
            scenario_id: scenario.id,
            status: scenario.status,
            attempted,
        })
    }
}

fn apply(scenario: &mut Scenario, to: ScenarioStatus, now: Timestamp, actor: Option<CountryId>) {
    scenario.transitions.push(ScenarioTransitionRecord {
        from_state: scenario.status,
        to_state: to,
        timestamp: now,
        actor,
    });
    scenario.status = to;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScenarioErrorKind;
    use crate::factory::{CountryRef, ScenarioFactory, ScenarioRequest};
    use crate::scenario::Choice;
    use crate::FactoryConfig;
    use dipl_core::{FixedClock, RiskLevel, ScenarioType, ScriptedRandom};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn start() -> Timestamp {
        Timestamp::parse("2026-05-01T09:00:00Z").unwrap()
    }

    fn cid(s: &str) -> CountryId {
        CountryId::new(s).unwrap()
    }

    fn choice(s: &str) -> ChoiceId {
        ChoiceId::parse(s).unwrap()
    }

    struct Harness {
        clock: Arc<FixedClock>,
        controller: LifecycleController,
        scenario: Scenario,
    }

    fn harness() -> Harness {
        let clock = Arc::new(FixedClock::new(start()));
        let mut factory = ScenarioFactory::new(
            FactoryConfig::default(),
            clock.clone(),
            ScriptedRandom::constant(0.0),
        )
        .unwrap();
        let scenario = factory
            .create_scenario(
                ScenarioRequest::between(
                    CountryRef::new(cid("urcea"), "Urcea"),
                    CountryRef::new(cid("caphiria"), "Caphiria"),
                )
                .with_type(ScenarioType::BorderDispute),
            )
            .unwrap();
        Harness {
            controller: LifecycleController::new(clock.clone()),
            clock,
            scenario,
        }
    }

    #[test]
    fn test_record_choice_completes_scenario() {
        let h = harness();
        h.clock.advance_hours(5);
        let resolution = h
            .controller
            .record_choice(&h.scenario, &choice("border_dispute_diplomatic"), &cid("urcea"))
            .unwrap();

        let s = &resolution.scenario;
        assert_eq!(s.status, ScenarioStatus::Completed);
        assert_eq!(s.resolved_at, Some(start().plus_hours(5)));
        assert_eq!(s.chosen_option, Some(choice("border_dispute_diplomatic")));
        assert_eq!(s.actual_diplomatic_impact, Some(10));
        assert_eq!(s.actual_cultural_impact, Some(5));
        assert_eq!(s.actual_economic_cost, Some(0));
        let notes = s.outcome_notes.as_ref().unwrap();
        assert_eq!(notes.choice_label, "Pursue Diplomatic Dialogue");
        assert_eq!(notes.country_id, cid("urcea"));
        assert_eq!(resolution.effects.relationship_change, 10);
        assert_eq!(resolution.choice.id, choice("border_dispute_diplomatic"));
        assert_eq!(resolution.choice.risk_level, RiskLevel::Low);
        assert_eq!(s.transitions.len(), 1);
        assert_eq!(s.transitions[0].from_state, ScenarioStatus::Active);
        s.validate().unwrap();
        // The input snapshot is untouched.
        assert_eq!(h.scenario.status, ScenarioStatus::Active);
    }

    #[test]
    fn test_effects_copied_exactly() {
        let mut h = harness();
        h.scenario.response_options.push(Choice {
            id: choice("border_dispute_custom"),
            label: "Custom".into(),
            description: String::new(),
            skill_required: "negotiation".into(),
            skill_level: 1,
            risk_level: RiskLevel::Low,
            effects: ChoiceEffects {
                relationship_change: -5,
                economic_impact: 3,
                reputation_change: 0,
                cultural_impact: Some(10),
                custom_effects: BTreeMap::new(),
            },
            predicted_outcomes: Default::default(),
        });
        let s = h
            .controller
            .record_choice(&h.scenario, &choice("border_dispute_custom"), &cid("caphiria"))
            .unwrap()
            .scenario;
        assert_eq!(s.actual_cultural_impact, Some(10));
        assert_eq!(s.actual_diplomatic_impact, Some(-5));
        assert_eq!(s.actual_economic_cost, Some(3));
    }

    #[test]
    fn test_missing_cultural_effect_defaults_to_zero() {
        let mut h = harness();
        h.scenario.response_options[0].effects.cultural_impact = None;
        let id = h.scenario.response_options[0].id.clone();
        let s = h
            .controller
            .record_choice(&h.scenario, &id, &cid("urcea"))
            .unwrap()
            .scenario;
        assert_eq!(s.actual_cultural_impact, Some(0));
    }

    #[test]
    fn test_pending_behaves_like_active() {
        let mut h = harness();
        h.scenario.status = ScenarioStatus::Pending;
        let result =
            h.controller
                .record_choice(&h.scenario, &choice("border_dispute_compromise"), &cid("urcea"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_completed_scenario_rejects_choice() {
        let h = harness();
        let done = h
            .controller
            .record_choice(&h.scenario, &choice("border_dispute_aggressive"), &cid("urcea"))
            .unwrap()
            .scenario;
        let err = h
            .controller
            .record_choice(&done, &choice("border_dispute_diplomatic"), &cid("urcea"))
            .unwrap_err();
        assert_eq!(err.kind(), ScenarioErrorKind::InvalidState);
    }

    #[test]
    fn test_unknown_choice_rejected() {
        let h = harness();
        let err = h
            .controller
            .record_choice(&h.scenario, &choice("nonexistent"), &cid("urcea"))
            .unwrap_err();
        assert_eq!(err.kind(), ScenarioErrorKind::UnknownChoice);
    }

    #[test]
    fn test_past_deadline_rejected_before_sweep() {
        let h = harness();
        h.clock.set(h.scenario.expires_at.plus_hours(1));
        let err = h
            .controller
            .record_choice(&h.scenario, &choice("border_dispute_diplomatic"), &cid("urcea"))
            .unwrap_err();
        assert_eq!(err.kind(), ScenarioErrorKind::Expired);
    }

    #[test]
    fn test_choice_at_exact_deadline_allowed() {
        let h = harness();
        h.clock.set(h.scenario.expires_at);
        assert!(h
            .controller
            .record_choice(&h.scenario, &choice("border_dispute_diplomatic"), &cid("urcea"))
            .is_ok());
    }

    #[test]
    fn test_state_checked_before_deadline() {
        let mut h = harness();
        h.scenario.status = ScenarioStatus::Declined;
        h.clock.set(h.scenario.expires_at.plus_days(1));
        let err = h
            .controller
            .record_choice(&h.scenario, &choice("nonexistent"), &cid("urcea"))
            .unwrap_err();
        assert_eq!(err.kind(), ScenarioErrorKind::InvalidState);
    }

    #[test]
    fn test_expire_after_deadline() {
        let h = harness();
        h.clock.set(h.scenario.expires_at);
        let expired = h.controller.expire(&h.scenario).unwrap();
        assert_eq!(expired.status, ScenarioStatus::Expired);
        assert!(expired.resolved_at.is_none());
        assert_eq!(expired.transitions.len(), 1);
        assert_eq!(expired.transitions[0].actor, None);
    }

    #[test]
    fn test_expire_is_idempotent() {
        let h = harness();
        h.clock.set(h.scenario.expires_at.plus_hours(2));
        let once = h.controller.expire(&h.scenario).unwrap();
        h.clock.advance_hours(10);
        let twice = h.controller.expire(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_expire_before_deadline_rejected() {
        let h = harness();
        let err = h.controller.expire(&h.scenario).unwrap_err();
        assert_eq!(err.kind(), ScenarioErrorKind::InvalidState);
    }

    #[test]
    fn test_terminal_states_reject_every_transition() {
        let h = harness();
        h.clock.set(h.scenario.expires_at.plus_days(1));
        for status in [ScenarioStatus::Completed, ScenarioStatus::Declined] {
            let mut s = h.scenario.clone();
            s.status = status;
            assert_eq!(
                h.controller.expire(&s).unwrap_err().kind(),
                ScenarioErrorKind::InvalidState
            );
        }
        let expired = h.controller.expire(&h.scenario).unwrap();
        assert_eq!(
            h.controller
                .record_choice(&expired, &choice("border_dispute_diplomatic"), &cid("urcea"))
                .unwrap_err()
                .kind(),
            ScenarioErrorKind::InvalidState
        );
    }
}
