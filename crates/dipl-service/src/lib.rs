//! # dipl-service — Calling Layer for the Diplomacy Engine
//!
//! The engine in `dipl-scenario` operates on in-memory values and performs
//! no I/O. This crate owns everything around it:
//!
//! - **Ports** (`ports.rs`): the collaborator traits the engine was
//!   built against: scenario persistence, relationship lookup,
//!   notifications, and rewards.
//! - **Store** (`store.rs`): an in-memory, optimistically versioned
//!   scenario repository.
//! - **Relationships** (`relationships.rs`): an in-memory relationship book.
//! - **Notify** (`notify.rs`): tracing-backed and recording notifiers.
//! - **Rewards** (`rewards.rs`): the IxCredit reward table.
//! - **Service** (`service.rs`): `DiplomacyService`, which wraps each engine
//!   call in fetch → transition → versioned save → reward → notify.
//!
//! ## At-most-once resolution
//!
//! The engine cannot see two callers resolving the same scenario. The
//! service reads a scenario together with its version and saves the result
//! only if the version is unchanged. The loser of a race gets
//! [`ServiceError::Conflict`], or [`ScenarioError`](dipl_scenario::ScenarioError)
//! `InvalidState` if it read the scenario after the winner saved.

pub mod error;
pub mod notify;
pub mod ports;
pub mod relationships;
pub mod rewards;
pub mod service;
pub mod store;

pub use error::{RepositoryError, ServiceError};
pub use notify::{RecordingNotifier, TracingNotifier};
pub use ports::{
    CandidateFilter, Notification, Notifier, RelationshipProvider, RewardPolicy,
    ScenarioRepository, Versioned,
};
pub use relationships::RelationshipBook;
pub use rewards::{IxCreditRewardTable, RewardGrant};
pub use service::{Collaborators, DiplomacyService, RankedCandidate, ResolutionReceipt};
pub use store::InMemoryScenarioRepository;
