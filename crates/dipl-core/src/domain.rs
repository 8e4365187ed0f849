//! # Scenario Vocabularies
//!
//! The closed enums shared by the factory, scorer, and lifecycle controller.
//! Each one has a single definition here; every `match` on them is
//! exhaustive, so adding a variant forces every consumer to handle it.
//!
//! All wire forms are `snake_case` (`trade_renegotiation`, `time_sensitive`).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DiplError;

/// Category of diplomatic situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioType {
    /// Competing claims over a shared border.
    BorderDispute,
    /// Renegotiation of an existing trade arrangement.
    TradeRenegotiation,
    /// An incident of cultural offence or misreading.
    CulturalMisunderstanding,
    /// Exposure of intelligence gathered on the other party.
    IntelligenceBreach,
    /// A humanitarian emergency requesting assistance.
    HumanitarianCrisis,
    /// A proposal to formalize an alliance.
    AllianceRequest,
    /// Pressure to join or lift economic sanctions.
    SanctionsPressure,
    /// A claim over disputed territory or waters.
    TerritorialClaim,
    /// Refugee flows across the shared border.
    RefugeeCrisis,
    /// Negotiated transfer of sensitive technology.
    TechnologyTransfer,
    /// A joint environmental commitment.
    EnvironmentalAccord,
    /// Public accusation of espionage.
    EspionageAccusation,
}

/// Number of scenario types; `ScenarioType::all()` yields exactly this many.
pub const SCENARIO_TYPE_COUNT: usize = 12;

impl ScenarioType {
    /// All scenario types in canonical order.
    pub fn all() -> &'static [ScenarioType] {
        &[
            Self::BorderDispute,
            Self::TradeRenegotiation,
            Self::CulturalMisunderstanding,
            Self::IntelligenceBreach,
            Self::HumanitarianCrisis,
            Self::AllianceRequest,
            Self::SanctionsPressure,
            Self::TerritorialClaim,
            Self::RefugeeCrisis,
            Self::TechnologyTransfer,
            Self::EnvironmentalAccord,
            Self::EspionageAccusation,
        ]
    }

    /// The types drawn from when a caller does not name one.
    pub fn common() -> &'static [ScenarioType] {
        &[
            Self::BorderDispute,
            Self::TradeRenegotiation,
            Self::CulturalMisunderstanding,
            Self::IntelligenceBreach,
            Self::HumanitarianCrisis,
            Self::AllianceRequest,
        ]
    }

    /// The snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BorderDispute => "border_dispute",
            Self::TradeRenegotiation => "trade_renegotiation",
            Self::CulturalMisunderstanding => "cultural_misunderstanding",
            Self::IntelligenceBreach => "intelligence_breach",
            Self::HumanitarianCrisis => "humanitarian_crisis",
            Self::AllianceRequest => "alliance_request",
            Self::SanctionsPressure => "sanctions_pressure",
            Self::TerritorialClaim => "territorial_claim",
            Self::RefugeeCrisis => "refugee_crisis",
            Self::TechnologyTransfer => "technology_transfer",
            Self::EnvironmentalAccord => "environmental_accord",
            Self::EspionageAccusation => "espionage_accusation",
        }
    }
}

/// Standing of the relationship between two countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipState {
    Hostile,
    Tense,
    #[default]
    Neutral,
    Friendly,
    Allied,
}

impl RelationshipState {
    /// The snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hostile => "hostile",
            Self::Tense => "tense",
            Self::Neutral => "neutral",
            Self::Friendly => "friendly",
            Self::Allied => "allied",
        }
    }
}

/// Risk tier of a response option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    /// The snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }
}

/// How hard a scenario is meant to be. Informational; carried in tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Trivial,
    #[default]
    Moderate,
    Challenging,
    Critical,
}

impl Difficulty {
    /// The snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Moderate => "moderate",
            Self::Challenging => "challenging",
            Self::Critical => "critical",
        }
    }
}

/// How long a scenario stays open before it expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    Urgent,
    TimeSensitive,
    #[default]
    Strategic,
    LongTerm,
}

impl TimeFrame {
    /// Days between creation and expiry.
    pub fn days(&self) -> i64 {
        match self {
            Self::Urgent => 3,
            Self::TimeSensitive => 7,
            Self::Strategic => 14,
            Self::LongTerm => 30,
        }
    }

    /// The snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::TimeSensitive => "time_sensitive",
            Self::Strategic => "strategic",
            Self::LongTerm => "long_term",
        }
    }
}

/// Implements `Display` via `as_str()` and `FromStr` by scanning `variants`.
macro_rules! wire_name_impls {
    ($ty:ty, $kind:literal, [$($variant:path),+ $(,)?]) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = DiplError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| DiplError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

wire_name_impls!(
    ScenarioType,
    "scenario type",
    [
        ScenarioType::BorderDispute,
        ScenarioType::TradeRenegotiation,
        ScenarioType::CulturalMisunderstanding,
        ScenarioType::IntelligenceBreach,
        ScenarioType::HumanitarianCrisis,
        ScenarioType::AllianceRequest,
        ScenarioType::SanctionsPressure,
        ScenarioType::TerritorialClaim,
        ScenarioType::RefugeeCrisis,
        ScenarioType::TechnologyTransfer,
        ScenarioType::EnvironmentalAccord,
        ScenarioType::EspionageAccusation,
    ]
);
wire_name_impls!(
    RelationshipState,
    "relationship state",
    [
        RelationshipState::Hostile,
        RelationshipState::Tense,
        RelationshipState::Neutral,
        RelationshipState::Friendly,
        RelationshipState::Allied,
    ]
);
wire_name_impls!(
    RiskLevel,
    "risk level",
    [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Extreme]
);
wire_name_impls!(
    Difficulty,
    "difficulty",
    [
        Difficulty::Trivial,
        Difficulty::Moderate,
        Difficulty::Challenging,
        Difficulty::Critical,
    ]
);
wire_name_impls!(
    TimeFrame,
    "time frame",
    [
        TimeFrame::Urgent,
        TimeFrame::TimeSensitive,
        TimeFrame::Strategic,
        TimeFrame::LongTerm,
    ]
);
