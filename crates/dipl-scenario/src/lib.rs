//! # dipl-scenario — Diplomatic Scenario Engine
//!
//! Pure-logic core of the diplomacy system. Every operation is a function
//! of its explicit inputs plus an injected [`Clock`](dipl_core::Clock) and,
//! for generation, an injected [`RandomSource`](dipl_core::RandomSource).
//! Nothing here performs I/O.
//!
//! ## Components
//!
//! - **Factory** (`factory.rs`): synthesizes an unpersisted [`Scenario`]
//!   from two countries and an optional relationship snapshot.
//!
//! - **Relevance** (`relevance.rs`): bounded `[0, 100]` score of how
//!   pressing a scenario is for one country, and batch selection of the
//!   most relevant candidate.
//!
//! - **Lifecycle** (`lifecycle.rs`): the two legal terminal transitions,
//!   `record_choice` (→ COMPLETED) and `expire` (→ EXPIRED).
//!
//! ## Lifecycle
//!
//! ```text
//! ACTIVE / PENDING ──record_choice()──▶ COMPLETED (terminal)
//!        │
//!        └──────────expire()──────────▶ EXPIRED   (terminal)
//!
//!                   (admin override)  ▶ DECLINED  (terminal)
//! ```
//!
//! ## Concurrency
//!
//! The engine holds no shared mutable state. Given a scenario snapshot it
//! computes the transition that snapshot implies; it cannot detect two
//! callers resolving the same scenario concurrently. At-most-once
//! resolution is the calling layer's job (see `dipl-service`).

pub mod config;
pub mod error;
pub mod factory;
pub mod lifecycle;
pub mod relevance;
pub mod scenario;
mod templates;

pub use config::FactoryConfig;
pub use error::{ScenarioError, ScenarioErrorKind};
pub use factory::{CountryRef, ScenarioFactory, ScenarioRequest};
pub use lifecycle::{ChoiceResolution, LifecycleController};
pub use relevance::{RankedScenario, Relationship, RelevanceBreakdown, RelevanceScorer};
pub use scenario::{
    Choice, ChoiceEffects, OutcomeNotes, PredictedOutcomes, RelationshipContext, Scenario,
    ScenarioStatus, ScenarioTags, ScenarioTransitionRecord,
};
