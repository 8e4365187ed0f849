//! # Engine Errors
//!
//! Every failure the engine can report. All four kinds are permanent for
//! the given input: the engine never retries, and callers should surface
//! them unmodified. None is fatal to the process.

use thiserror::Error;

use dipl_core::{ChoiceId, DiplError, ScenarioId, Timestamp};

use crate::scenario::ScenarioStatus;

/// Discriminator for [`ScenarioError`], for callers that map errors to
/// transport codes without matching on payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioErrorKind {
    InvalidInput,
    InvalidState,
    Expired,
    UnknownChoice,
}

/// Errors produced by the factory and the lifecycle controller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// Input rejected before any state was considered.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// Transition attempted from a state that does not allow it.
    #[error("scenario {scenario_id} is {status}; cannot transition to {attempted}")]
    InvalidState {
        /// The scenario.
        scenario_id: ScenarioId,
        /// Its current status.
        status: ScenarioStatus,
        /// The attempted target status.
        attempted: ScenarioStatus,
    },

    /// Transition attempted after the scenario's deadline.
    #[error("scenario {scenario_id} expired at {expires_at} (now {now})")]
    Expired {
        /// The scenario.
        scenario_id: ScenarioId,
        /// Its deadline.
        expires_at: Timestamp,
        /// The clock reading used for the check.
        now: Timestamp,
    },

    /// The requested choice is not on the scenario's option list.
    #[error("scenario {scenario_id} has no choice {choice_id}")]
    UnknownChoice {
        /// The scenario.
        scenario_id: ScenarioId,
        /// The requested choice.
        choice_id: ChoiceId,
    },
}

impl ScenarioError {
    /// The error's kind.
    pub fn kind(&self) -> ScenarioErrorKind {
        match self {
            Self::InvalidInput { .. } => ScenarioErrorKind::InvalidInput,
            Self::InvalidState { .. } => ScenarioErrorKind::InvalidState,
            Self::Expired { .. } => ScenarioErrorKind::Expired,
            Self::UnknownChoice { .. } => ScenarioErrorKind::UnknownChoice,
        }
    }
}

impl From<DiplError> for ScenarioError {
    fn from(err: DiplError) -> Self {
        Self::InvalidInput {
            reason: err.to_string(),
        }
    }
}
