//! # dipl-core — Foundational Types for the Diplomacy Engine
//!
//! Defines the primitives every other `dipl-*` crate builds on. It depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `ScenarioId`, `CountryId`, and
//!    `ChoiceId` are distinct types with validated constructors. A country
//!    id cannot be passed where a choice id is expected.
//!
//! 2. **Closed vocabularies.** `ScenarioType`, `RelationshipState`,
//!    `RiskLevel`, `Difficulty`, and `TimeFrame` are enums with exhaustive
//!    `match` everywhere. Their wire form is `snake_case`.
//!
//! 3. **No ambient time or randomness.** Every comparison against a
//!    deadline goes through a [`Clock`], and every random draw goes through
//!    a [`RandomSource`]. Tests inject [`FixedClock`] and [`ScriptedRandom`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dipl-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod domain;
pub mod error;
pub mod identity;
pub mod random;
pub mod temporal;

pub use domain::{Difficulty, RelationshipState, RiskLevel, ScenarioType, TimeFrame};
pub use error::DiplError;
pub use identity::{ChoiceId, CountryId, ScenarioId};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use temporal::{Clock, FixedClock, SharedClock, SystemClock, Timestamp};
