//! # Error Types
//!
//! Errors raised while constructing or parsing core primitives. Engine
//! errors (invalid transitions, unknown choices) live in `dipl-scenario`.

use thiserror::Error;

/// Top-level error type for core primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiplError {
    /// A value failed validation at construction time.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A timestamp could not be parsed or was not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A string did not name any variant of a closed vocabulary.
    #[error("unknown {kind} {value:?}")]
    UnknownVariant {
        /// The vocabulary being parsed (e.g. "scenario type").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}
