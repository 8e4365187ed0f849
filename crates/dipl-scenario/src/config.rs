//! # Factory Configuration
//!
//! Tunables for scenario generation, loadable from YAML:
//!
//! ```yaml
//! randomizable_types: [border_dispute, trade_renegotiation]
//! default_difficulty: moderate
//! default_time_frame: strategic
//! friendly_option_threshold: 70
//! ```
//!
//! Every field is optional; omitted fields take the built-in defaults.

use serde::{Deserialize, Serialize};

use dipl_core::{Difficulty, ScenarioType, TimeFrame};

use crate::error::ScenarioError;

/// Configuration for [`ScenarioFactory`](crate::ScenarioFactory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    /// Types drawn from, uniformly, when a request names none.
    pub randomizable_types: Vec<ScenarioType>,
    pub default_difficulty: Difficulty,
    pub default_time_frame: TimeFrame,
    /// Relationship strength strictly above which the `friendly` option is
    /// offered.
    pub friendly_option_threshold: u8,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            randomizable_types: ScenarioType::common().to_vec(),
            default_difficulty: Difficulty::Moderate,
            default_time_frame: TimeFrame::Strategic,
            friendly_option_threshold: 70,
        }
    }
}

impl FactoryConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScenarioError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ScenarioError::InvalidInput {
            reason: format!("factory config: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the factory cannot run with.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.randomizable_types.is_empty() {
            return Err(ScenarioError::InvalidInput {
                reason: "factory config: randomizable_types must not be empty".into(),
            });
        }
        if self.friendly_option_threshold > 100 {
            return Err(ScenarioError::InvalidInput {
                reason: format!(
                    "factory config: friendly_option_threshold {} exceeds 100",
                    self.friendly_option_threshold
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = FactoryConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, FactoryConfig::default());
        assert_eq!(config.randomizable_types.len(), 6);
    }

    #[test]
    fn test_partial_override() {
        let yaml = "randomizable_types: [refugee_crisis, espionage_accusation]\n\
                    default_time_frame: urgent\n";
        let config = FactoryConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.randomizable_types,
            vec![ScenarioType::RefugeeCrisis, ScenarioType::EspionageAccusation]
        );
        assert_eq!(config.default_time_frame, TimeFrame::Urgent);
        assert_eq!(config.default_difficulty, Difficulty::Moderate);
    }

    #[test]
    fn test_empty_type_list_rejected() {
        let err = FactoryConfig::from_yaml_str("randomizable_types: []").unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidInput { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FactoryConfig::from_yaml_str("max_options: 9").is_err());
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(FactoryConfig::from_yaml_str("randomizable_types: [civil_war]").is_err());
    }
}
