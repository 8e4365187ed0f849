//! Error types for the calling layer.

use thiserror::Error;

use dipl_core::ScenarioId;
use dipl_scenario::ScenarioError;

/// Failures reported by a [`ScenarioRepository`](crate::ScenarioRepository).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No scenario with this id is stored.
    #[error("scenario {0} not found")]
    NotFound(ScenarioId),

    /// An insert collided with an existing id.
    #[error("scenario {0} already exists")]
    Duplicate(ScenarioId),

    /// The stored version moved on since the caller read it.
    #[error("scenario {scenario_id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        scenario_id: ScenarioId,
        expected: u64,
        found: u64,
    },

    /// The backing store failed.
    #[error("storage backend: {0}")]
    Backend(String),
}

/// Errors returned by [`DiplomacyService`](crate::DiplomacyService).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The requested scenario does not exist.
    #[error("scenario {0} not found")]
    NotFound(ScenarioId),

    /// Another caller changed the scenario first. Not retried here.
    #[error("scenario {scenario_id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        scenario_id: ScenarioId,
        expected: u64,
        found: u64,
    },

    /// The engine rejected the operation.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    /// Storage failed for reasons unrelated to the scenario's state.
    #[error("repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::NotFound(id),
            RepositoryError::Conflict {
                scenario_id,
                expected,
                found,
            } => Self::Conflict {
                scenario_id,
                expected,
                found,
            },
            other => Self::Repository(other.to_string()),
        }
    }
}
