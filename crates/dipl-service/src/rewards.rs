//! # IxCredit Rewards
//!
//! Reward table applied when a country resolves a scenario. Base credits
//! depend on the chosen option's risk tier; high-stakes scenarios
//! (`cultural_impact > 70` or `diplomatic_risk > 70`) pay half again,
//! rounded up.
//!
//! | Risk | Base | High stakes |
//! |------|------|-------------|
//! | low | 5 | 8 |
//! | medium | 10 | 15 |
//! | high | 20 | 30 |
//! | extreme | 35 | 53 |

use serde::{Deserialize, Serialize};

use dipl_core::{CountryId, RiskLevel};
use dipl_scenario::{Choice, Scenario};

use crate::ports::RewardPolicy;

/// Credits granted to the resolving country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardGrant {
    pub country_id: CountryId,
    pub credits: u32,
    pub risk_level: RiskLevel,
    pub high_stakes: bool,
}

/// The default reward table.
#[derive(Debug, Clone, Copy, Default)]
pub struct IxCreditRewardTable;

impl IxCreditRewardTable {
    /// Base credits for a risk tier.
    pub fn base_credits(risk: RiskLevel) -> u32 {
        match risk {
            RiskLevel::Low => 5,
            RiskLevel::Medium => 10,
            RiskLevel::High => 20,
            RiskLevel::Extreme => 35,
        }
    }
}

impl RewardPolicy for IxCreditRewardTable {
    fn reward(&self, scenario: &Scenario, choice: &Choice, resolved_by: &CountryId) -> RewardGrant {
        let base = Self::base_credits(choice.risk_level);
        let high_stakes = scenario.is_high_stakes();
        let credits = if high_stakes { (base * 3).div_ceil(2) } else { base };
        RewardGrant {
            country_id: resolved_by.clone(),
            credits,
            risk_level: choice.risk_level,
            high_stakes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dipl_core::{FixedClock, ScriptedRandom, Timestamp};
    use dipl_scenario::{CountryRef, FactoryConfig, ScenarioFactory, ScenarioRequest};
    use std::sync::Arc;

    fn scenario(cultural_impact: u8, diplomatic_risk: u8) -> Scenario {
        let mut f = ScenarioFactory::new(
            FactoryConfig::default(),
            Arc::new(FixedClock::new(Timestamp::parse("2026-05-01T09:00:00Z").unwrap())),
            ScriptedRandom::constant(0.0),
        )
        .unwrap();
        let mut s = f
            .create_scenario(ScenarioRequest::between(
                CountryRef::new(CountryId::new("urcea").unwrap(), "Urcea"),
                CountryRef::new(CountryId::new("caphiria").unwrap(), "Caphiria"),
            ))
            .unwrap();
        s.cultural_impact = cultural_impact;
        s.diplomatic_risk = diplomatic_risk;
        s
    }

    #[test]
    fn test_reward_by_risk() {
        let s = scenario(50, 50);
        let who = CountryId::new("urcea").unwrap();
        let table = IxCreditRewardTable;
        let credits: Vec<u32> = s
            .response_options
            .iter()
            .map(|c| table.reward(&s, c, &who).credits)
            .collect();
        // aggressive (high), diplomatic (low), compromise (medium)
        assert_eq!(credits, vec![20, 5, 10]);
    }

    #[test]
    fn test_high_stakes_boost() {
        let who = CountryId::new("urcea").unwrap();
        for s in [scenario(71, 0), scenario(0, 71)] {
            let grant = IxCreditRewardTable.reward(&s, &s.response_options[1], &who);
            assert!(grant.high_stakes);
            assert_eq!(grant.credits, 8);
        }
        let s = scenario(70, 70);
        assert!(!IxCreditRewardTable.reward(&s, &s.response_options[0], &who).high_stakes);
    }

    #[test]
    fn test_extreme_high_stakes_rounds_up() {
        assert_eq!((IxCreditRewardTable::base_credits(RiskLevel::Extreme) * 3).div_ceil(2), 53);
    }
}
