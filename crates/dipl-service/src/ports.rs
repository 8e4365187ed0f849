//! # Collaborator Ports
//!
//! Traits for the external systems the service sequences around each
//! engine call. Implementations must be `Send + Sync`; the service shares
//! them across threads behind `Arc`.

use serde::{Deserialize, Serialize};

use dipl_core::{ChoiceId, CountryId, ScenarioId, Timestamp};
use dipl_scenario::{Choice, Relationship, RelationshipContext, Scenario, ScenarioStatus};

use crate::error::RepositoryError;
use crate::rewards::RewardGrant;

// ─── Persistence ─────────────────────────────────────────────────────

/// A stored value together with its optimistic-lock version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

/// Selection criteria for [`ScenarioRepository::find_candidates`].
///
/// Every criterion left unset matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Allowed statuses. Empty allows all.
    pub statuses: Vec<ScenarioStatus>,
    /// Only scenarios where this country is a party.
    pub country: Option<CountryId>,
    /// Only scenarios whose deadline has not strictly passed at this instant.
    pub open_at: Option<Timestamp>,
    /// Only scenarios whose deadline has been reached at this instant.
    pub due_by: Option<Timestamp>,
}

impl CandidateFilter {
    /// Open scenarios involving `country` that are still within their deadline.
    pub fn open_for(country: CountryId, now: Timestamp) -> Self {
        Self {
            statuses: vec![ScenarioStatus::Active, ScenarioStatus::Pending],
            country: Some(country),
            open_at: Some(now),
            due_by: None,
        }
    }

    /// Open scenarios whose deadline has been reached at `now`.
    pub fn due(now: Timestamp) -> Self {
        Self {
            statuses: vec![ScenarioStatus::Active, ScenarioStatus::Pending],
            country: None,
            open_at: None,
            due_by: Some(now),
        }
    }

    /// Whether `scenario` satisfies every set criterion.
    pub fn matches(&self, scenario: &Scenario) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&scenario.status))
            && self.country.as_ref().map_or(true, |c| scenario.involves(c))
            && self.open_at.map_or(true, |now| !scenario.is_past_deadline(now))
            && self.due_by.map_or(true, |now| now >= scenario.expires_at)
    }
}

/// Scenario persistence.
pub trait ScenarioRepository: Send + Sync {
    /// The stored scenario and its version.
    fn find_by_id(&self, id: &ScenarioId) -> Result<Option<Versioned<Scenario>>, RepositoryError>;

    /// Scenarios matching `filter`, ordered by creation time then id.
    fn find_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Scenario>, RepositoryError>;

    /// Store a new scenario at version 1.
    fn insert(&self, scenario: Scenario) -> Result<u64, RepositoryError>;

    /// Replace a stored scenario if its version still equals
    /// `expected_version`. Returns the new version.
    fn save(&self, scenario: Scenario, expected_version: u64) -> Result<u64, RepositoryError>;
}

// ─── Relationships ───────────────────────────────────────────────────

/// Relationship tracking. Absence is not an error; callers fall back to
/// neutral defaults.
pub trait RelationshipProvider: Send + Sync {
    /// The relationship between `a` and `b`, in either order.
    fn relationship(&self, a: &CountryId, b: &CountryId) -> Option<RelationshipContext>;

    /// Every tracked relationship involving `country`.
    fn relationships_of(&self, country: &CountryId) -> Vec<Relationship>;
}

// ─── Notifications ───────────────────────────────────────────────────

/// Lifecycle events addressed to both parties of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    ScenarioCreated {
        scenario_id: ScenarioId,
        title: String,
        recipients: [CountryId; 2],
    },
    ScenarioResolved {
        scenario_id: ScenarioId,
        choice_id: ChoiceId,
        resolved_by: CountryId,
        recipients: [CountryId; 2],
    },
    ScenarioExpired {
        scenario_id: ScenarioId,
        recipients: [CountryId; 2],
    },
}

impl Notification {
    /// The scenario the notification concerns.
    pub fn scenario_id(&self) -> ScenarioId {
        match self {
            Self::ScenarioCreated { scenario_id, .. }
            | Self::ScenarioResolved { scenario_id, .. }
            | Self::ScenarioExpired { scenario_id, .. } => *scenario_id,
        }
    }

    pub(crate) fn recipients_of(scenario: &Scenario) -> [CountryId; 2] {
        [scenario.country1_id.clone(), scenario.country2_id.clone()]
    }
}

/// Delivery of lifecycle notifications. Fire-and-forget: delivery failures
/// are the implementation's concern and never fail the operation.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

// ─── Rewards ─────────────────────────────────────────────────────────

/// Computes the reward for resolving a scenario with a given choice.
pub trait RewardPolicy: Send + Sync {
    fn reward(&self, scenario: &Scenario, choice: &Choice, resolved_by: &CountryId) -> RewardGrant;
}
