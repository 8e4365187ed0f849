//! # Identity Newtypes
//!
//! Newtype wrappers for the identifiers the engine handles. These prevent
//! accidental identifier confusion: a `CountryId` cannot be passed where a
//! `ChoiceId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DiplError;

/// Unique identifier for a diplomatic scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub Uuid);

/// Identifier of a country, as issued by the country registry.
///
/// Opaque to the engine; the only requirement is that it is non-empty
/// and contains no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryId(String);

/// Identifier of a response option, unique within one scenario.
///
/// Format: lowercase ASCII letters, digits, and `_`, e.g.
/// `trade_renegotiation_aggressive`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChoiceId(String);

impl ScenarioId {
    /// Generate a new random scenario identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a scenario identifier from its UUID string form.
    pub fn parse(s: &str) -> Result<Self, DiplError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| DiplError::InvalidInput(format!("scenario id {s:?}: {e}")))
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ScenarioId {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryId {
    /// Create a country identifier, rejecting empty or padded input.
    pub fn new(id: impl Into<String>) -> Result<Self, DiplError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DiplError::InvalidInput("country id must not be empty".into()));
        }
        if id.trim() != id {
            return Err(DiplError::InvalidInput(format!(
                "country id {id:?} has surrounding whitespace"
            )));
        }
        Ok(Self(id))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ChoiceId {
    /// Parse a choice identifier, rejecting malformed input.
    pub fn parse(id: impl Into<String>) -> Result<Self, DiplError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DiplError::InvalidInput("choice id must not be empty".into()));
        }
        let well_formed = id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
        if !well_formed {
            return Err(DiplError::InvalidInput(format!(
                "choice id {id:?} must contain only lowercase letters, digits, and '_'"
            )));
        }
        Ok(Self(id))
    }

    /// Build the namespaced id `{prefix}_{suffix}` used for generated options.
    pub fn namespaced(prefix: &str, suffix: &str) -> Result<Self, DiplError> {
        Self::parse(format!("{prefix}_{suffix}"))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CountryId {
    type Error = DiplError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryId> for String {
    fn from(id: CountryId) -> Self {
        id.0
    }
}

impl TryFrom<String> for ChoiceId {
    type Error = DiplError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ChoiceId> for String {
    fn from(id: ChoiceId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for CountryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
