//! # Diplomacy Service
//!
//! Sequences the collaborators around each engine call:
//!
//! ```text
//! create_scenario:   relationship lookup → factory → insert → notify
//! most_relevant_for: candidate query → relationships → select_most_relevant
//! resolve:           fetch (+version) → record_choice → save(version) → reward → notify
//! expire_due:        due query → per scenario: fetch → expire → save(version) → notify
//! ```
//!
//! The engine stays pure; every side effect happens here, and only after
//! the engine has accepted the transition.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use dipl_core::{ChoiceId, CountryId, RandomSource, ScenarioId, ScenarioType, SharedClock};
use dipl_scenario::{
    ChoiceEffects, FactoryConfig, LifecycleController, RelevanceScorer, Scenario, ScenarioFactory,
    ScenarioRequest,
};

use crate::error::{RepositoryError, ServiceError};
use crate::ports::{
    CandidateFilter, Notification, Notifier, RelationshipProvider, RewardPolicy,
    ScenarioRepository,
};
use crate::rewards::RewardGrant;

/// The external systems the service talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub repository: Arc<dyn ScenarioRepository>,
    pub relationships: Arc<dyn RelationshipProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub rewards: Arc<dyn RewardPolicy>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// The most relevant open scenario for a country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub scenario: Scenario,
    pub relevance_score: u8,
}

/// Outcome of a successful [`DiplomacyService::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionReceipt {
    /// The scenario as saved, in its `Completed` state.
    pub scenario: Scenario,
    /// The stored version after the save.
    pub version: u64,
    pub effects: ChoiceEffects,
    pub reward: RewardGrant,
}

/// Calling layer around the scenario engine.
#[derive(Debug)]
pub struct DiplomacyService<R: RandomSource> {
    collaborators: Collaborators,
    factory: Mutex<ScenarioFactory<R>>,
    scorer: RelevanceScorer,
    lifecycle: LifecycleController,
    clock: SharedClock,
}

impl<R: RandomSource> DiplomacyService<R> {
    /// Build the service. Fails if `config` is invalid.
    pub fn new(
        collaborators: Collaborators,
        config: FactoryConfig,
        clock: SharedClock,
        rng: R,
    ) -> Result<Self, ServiceError> {
        let factory = ScenarioFactory::new(config, clock.clone(), rng)?;
        Ok(Self {
            collaborators,
            factory: Mutex::new(factory),
            scorer: RelevanceScorer::new(clock.clone()),
            lifecycle: LifecycleController::new(clock.clone()),
            clock,
        })
    }

    pub fn repository(&self) -> &Arc<dyn ScenarioRepository> {
        &self.collaborators.repository
    }

    /// Generate, store, and announce a scenario.
    ///
    /// When the request carries no relationship, the tracked relationship
    /// between the two countries is used; absent that, neutral defaults.
    pub fn create_scenario(&self, mut request: ScenarioRequest) -> Result<Scenario, ServiceError> {
        if request.relationship.is_none() {
            request.relationship = self
                .collaborators
                .relationships
                .relationship(&request.country1.id, &request.country2.id);
        }

        let scenario = self.factory.lock().create_scenario(request)?;
        self.collaborators.repository.insert(scenario.clone())?;
        tracing::info!(
            scenario_id = %scenario.id,
            scenario_type = %scenario.scenario_type,
            expires_at = %scenario.expires_at,
            "scenario stored"
        );

        self.collaborators.notifier.notify(Notification::ScenarioCreated {
            scenario_id: scenario.id,
            title: scenario.title.clone(),
            recipients: Notification::recipients_of(&scenario),
        });
        Ok(scenario)
    }

    /// A stored scenario by id.
    pub fn scenario(&self, id: &ScenarioId) -> Result<Scenario, ServiceError> {
        self.collaborators
            .repository
            .find_by_id(id)?
            .map(|v| v.value)
            .ok_or(ServiceError::NotFound(*id))
    }

    /// Open, unexpired scenarios involving `country`, ordered by creation.
    pub fn open_for(&self, country: &CountryId) -> Result<Vec<Scenario>, ServiceError> {
        let filter = CandidateFilter::open_for(country.clone(), self.clock.now());
        Ok(self.collaborators.repository.find_candidates(&filter)?)
    }

    /// The highest-scoring open scenario involving `country`, if any.
    pub fn most_relevant_for(
        &self,
        country: &CountryId,
        preferred_type: Option<ScenarioType>,
    ) -> Result<Option<RankedCandidate>, ServiceError> {
        let candidates = self.open_for(country)?;
        if candidates.is_empty() {
            return Ok(None);
        }
        let relationships = self.collaborators.relationships.relationships_of(country);
        Ok(self
            .scorer
            .select_most_relevant(&candidates, country, &relationships, preferred_type)
            .map(|ranked| RankedCandidate {
                scenario: ranked.scenario.clone(),
                relevance_score: ranked.relevance_score,
            }))
    }

    /// Resolve a scenario with one of its options on behalf of `country`.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`] for an unknown id.
    /// - [`ServiceError::Scenario`] when the engine rejects the choice.
    /// - [`ServiceError::Conflict`] when another caller saved the scenario
    ///   after it was read here. The losing resolution is discarded.
    pub fn resolve(
        &self,
        scenario_id: &ScenarioId,
        choice_id: &ChoiceId,
        country: &CountryId,
    ) -> Result<ResolutionReceipt, ServiceError> {
        let stored = self
            .collaborators
            .repository
            .find_by_id(scenario_id)?
            .ok_or(ServiceError::NotFound(*scenario_id))?;

        let resolution = self
            .lifecycle
            .record_choice(&stored.value, choice_id, country)?;

        let version = self
            .collaborators
            .repository
            .save(resolution.scenario.clone(), stored.version)
            .map_err(|err| {
                if matches!(err, RepositoryError::Conflict { .. }) {
                    tracing::warn!(
                        scenario_id = %scenario_id,
                        "resolution lost a concurrent update"
                    );
                }
                ServiceError::from(err)
            })?;

        let scenario = resolution.scenario;
        let reward = self
            .collaborators
            .rewards
            .reward(&scenario, &resolution.choice, country);
        tracing::info!(
            scenario_id = %scenario.id,
            country = %country,
            credits = reward.credits,
            version,
            "resolution saved"
        );

        self.collaborators.notifier.notify(Notification::ScenarioResolved {
            scenario_id: scenario.id,
            choice_id: choice_id.clone(),
            resolved_by: country.clone(),
            recipients: Notification::recipients_of(&scenario),
        });

        Ok(ResolutionReceipt {
            scenario,
            version,
            effects: resolution.effects,
            reward,
        })
    }

    /// Expire every open scenario whose deadline has been reached.
    ///
    /// Scenarios that another caller changes mid-sweep are skipped and left
    /// for the next run. Returns the number expired.
    pub fn expire_due(&self) -> Result<usize, ServiceError> {
        let due = self
            .collaborators
            .repository
            .find_candidates(&CandidateFilter::due(self.clock.now()))?;

        let mut expired = 0;
        for candidate in due {
            let Some(stored) = self.collaborators.repository.find_by_id(&candidate.id)? else {
                continue;
            };
            let updated = match self.lifecycle.expire(&stored.value) {
                Ok(updated) if updated.status != stored.value.status => updated,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(scenario_id = %candidate.id, error = %err, "skipping expiry");
                    continue;
                }
            };
            match self.collaborators.repository.save(updated.clone(), stored.version) {
                Ok(_) => {}
                Err(RepositoryError::Conflict { .. }) => {
                    tracing::warn!(scenario_id = %candidate.id, "expiry lost a concurrent update");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            self.collaborators.notifier.notify(Notification::ScenarioExpired {
                scenario_id: updated.id,
                recipients: Notification::recipients_of(&updated),
            });
            expired += 1;
        }

        if expired > 0 {
            tracing::info!(expired, "expiry sweep finished");
        }
        Ok(expired)
    }
}
