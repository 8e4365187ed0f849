//! Global options shared by every subcommand, and construction of the
//! service from them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use dipl_core::{FixedClock, SharedClock, StdRandom, SystemClock, Timestamp};
use dipl_scenario::{FactoryConfig, Relationship};
use dipl_service::{
    Collaborators, DiplomacyService, IxCreditRewardTable, RelationshipBook, TracingNotifier,
};

use crate::state::JsonDirRepository;

/// Default location of the scenario state directory.
pub const DEFAULT_STATE_DIR: &str = ".dipl/scenarios";

/// Resolved global options.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub state_dir: PathBuf,
    /// Factory configuration YAML. Defaults apply when absent.
    pub config: Option<PathBuf>,
    /// YAML list of tracked relationships.
    pub relationships: Option<PathBuf>,
    /// Pins the clock, for reproducible runs.
    pub now: Option<Timestamp>,
    /// Seeds the random source.
    pub seed: Option<u64>,
}

impl RunContext {
    /// A context with defaults for everything but the state directory.
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            config: None,
            relationships: None,
            now: None,
            seed: None,
        }
    }

    pub fn clock(&self) -> SharedClock {
        match self.now {
            Some(at) => Arc::new(FixedClock::new(at)),
            None => Arc::new(SystemClock),
        }
    }

    /// Build a service over the state directory.
    pub fn service(&self) -> Result<DiplomacyService<StdRandom>> {
        let config = load_factory_config(self.config.as_deref())?;
        let book = match &self.relationships {
            Some(path) => load_relationships(path)?,
            None => RelationshipBook::new(),
        };
        let rng = match self.seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::from_entropy(),
        };
        let collaborators = Collaborators {
            repository: Arc::new(JsonDirRepository::new(&self.state_dir)),
            relationships: Arc::new(book),
            notifier: Arc::new(TracingNotifier),
            rewards: Arc::new(IxCreditRewardTable),
        };
        DiplomacyService::new(collaborators, config, self.clock(), rng)
            .context("failed to initialize diplomacy service")
    }
}

/// Load a factory configuration, or the defaults when `path` is `None`.
pub fn load_factory_config(path: Option<&Path>) -> Result<FactoryConfig> {
    let Some(path) = path else {
        return Ok(FactoryConfig::default());
    };
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = FactoryConfig::from_yaml_str(&yaml)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        types = config.randomizable_types.len(),
        "loaded factory config"
    );
    Ok(config)
}

/// Load a YAML list of relationships.
pub fn load_relationships(path: &Path) -> Result<RelationshipBook> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read relationships: {}", path.display()))?;
    let entries: Vec<Relationship> = serde_yaml::from_str(&yaml)
        .with_context(|| format!("failed to parse relationships: {}", path.display()))?;
    let count = entries.len();
    let book = RelationshipBook::new();
    book.extend(entries)
        .with_context(|| format!("invalid relationship in {}", path.display()))?;
    tracing::debug!(path = %path.display(), count, "loaded relationships");
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dipl_core::{CountryId, RelationshipState, ScenarioType};
    use dipl_service::RelationshipProvider;

    #[test]
    fn missing_config_uses_defaults() {
        assert_eq!(load_factory_config(None).unwrap(), FactoryConfig::default());
    }

    #[test]
    fn config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dipl.yaml");
        std::fs::write(
            &path,
            "randomizable_types: [refugee_crisis]\nfriendly_option_threshold: 40\n",
        )
        .unwrap();
        let config = load_factory_config(Some(&path)).unwrap();
        assert_eq!(config.randomizable_types, vec![ScenarioType::RefugeeCrisis]);
        assert_eq!(config.friendly_option_threshold, 40);
    }

    #[test]
    fn empty_type_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dipl.yaml");
        std::fs::write(&path, "randomizable_types: []\n").unwrap();
        assert!(load_factory_config(Some(&path)).is_err());
    }

    #[test]
    fn missing_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_factory_config(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));
    }

    #[test]
    fn relationships_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relationships.yaml");
        std::fs::write(
            &path,
            "- country_a: urcea\n  country_b: caphiria\n  state: allied\n  strength: 85\n",
        )
        .unwrap();
        let book = load_relationships(&path).unwrap();
        let ctx = book
            .relationship(
                &CountryId::new("caphiria").unwrap(),
                &CountryId::new("urcea").unwrap(),
            )
            .unwrap();
        assert_eq!(ctx.state, RelationshipState::Allied);
        assert_eq!(ctx.strength, 85);
    }

    #[test]
    fn pinned_clock_is_used() {
        let at = Timestamp::parse("2026-05-01T09:00:00Z").unwrap();
        let mut ctx = RunContext::new("unused");
        ctx.now = Some(at);
        assert_eq!(ctx.clock().now(), at);
    }
}
