//! # In-Memory Scenario Store
//!
//! Thread-safe, cloneable, optimistically versioned scenario repository.
//!
//! All operations are synchronous and hold a `parking_lot::RwLock` only for
//! the duration of one map operation. `parking_lot` locks are not poisoned,
//! so a panicking writer does not permanently corrupt the store.
//!
//! `save` compares the caller's version and writes under the same write
//! lock, so no other writer can slip in between check and update.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use dipl_core::ScenarioId;
use dipl_scenario::Scenario;

use crate::error::RepositoryError;
use crate::ports::{CandidateFilter, ScenarioRepository, Versioned};

/// In-memory [`ScenarioRepository`].
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScenarioRepository {
    data: Arc<RwLock<HashMap<ScenarioId, Versioned<Scenario>>>>,
}

impl InMemoryScenarioRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored scenarios.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScenarioRepository for InMemoryScenarioRepository {
    fn find_by_id(&self, id: &ScenarioId) -> Result<Option<Versioned<Scenario>>, RepositoryError> {
        Ok(self.data.read().get(id).cloned())
    }

    fn find_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Scenario>, RepositoryError> {
        let mut found: Vec<Scenario> = self
            .data
            .read()
            .values()
            .filter(|v| filter.matches(&v.value))
            .map(|v| v.value.clone())
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    fn insert(&self, scenario: Scenario) -> Result<u64, RepositoryError> {
        let mut guard = self.data.write();
        if guard.contains_key(&scenario.id) {
            return Err(RepositoryError::Duplicate(scenario.id));
        }
        guard.insert(
            scenario.id,
            Versioned {
                value: scenario,
                version: 1,
            },
        );
        Ok(1)
    }

    fn save(&self, scenario: Scenario, expected_version: u64) -> Result<u64, RepositoryError> {
        let mut guard = self.data.write();
        let entry = guard
            .get_mut(&scenario.id)
            .ok_or(RepositoryError::NotFound(scenario.id))?;
        if entry.version != expected_version {
            return Err(RepositoryError::Conflict {
                scenario_id: scenario.id,
                expected: expected_version,
                found: entry.version,
            });
        }
        entry.version += 1;
        entry.value = scenario;
        Ok(entry.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dipl_core::{CountryId, FixedClock, ScriptedRandom, Timestamp};
    use dipl_scenario::{
        CountryRef, FactoryConfig, ScenarioFactory, ScenarioRequest, ScenarioStatus,
    };

    fn now() -> Timestamp {
        Timestamp::parse("2026-05-01T09:00:00Z").unwrap()
    }

    fn make(c1: &str, c2: &str) -> Scenario {
        let mut f = ScenarioFactory::new(
            FactoryConfig::default(),
            Arc::new(FixedClock::new(now())),
            ScriptedRandom::constant(0.0),
        )
        .unwrap();
        f.create_scenario(ScenarioRequest::between(
            CountryRef::new(CountryId::new(c1).unwrap(), c1),
            CountryRef::new(CountryId::new(c2).unwrap(), c2),
        ))
        .unwrap()
    }

    #[test]
    fn test_insert_and_find() {
        let store = InMemoryScenarioRepository::new();
        let s = make("urcea", "caphiria");
        assert_eq!(store.insert(s.clone()).unwrap(), 1);
        let found = store.find_by_id(&s.id).unwrap().unwrap();
        assert_eq!(found.version, 1);
        assert_eq!(found.value, s);
        assert!(store.find_by_id(&ScenarioId::new()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let store = InMemoryScenarioRepository::new();
        let s = make("urcea", "caphiria");
        store.insert(s.clone()).unwrap();
        assert_eq!(store.insert(s.clone()), Err(RepositoryError::Duplicate(s.id)));
    }

    #[test]
    fn test_save_bumps_version() {
        let store = InMemoryScenarioRepository::new();
        let mut s = make("urcea", "caphiria");
        store.insert(s.clone()).unwrap();
        s.status = ScenarioStatus::Pending;
        assert_eq!(store.save(s.clone(), 1).unwrap(), 2);
        assert_eq!(
            store.find_by_id(&s.id).unwrap().unwrap().value.status,
            ScenarioStatus::Pending
        );
    }

    #[test]
    fn test_stale_save_conflicts() {
        let store = InMemoryScenarioRepository::new();
        let s = make("urcea", "caphiria");
        store.insert(s.clone()).unwrap();
        store.save(s.clone(), 1).unwrap();
        let err = store.save(s.clone(), 1).unwrap_err();
        assert_eq!(
            err,
            RepositoryError::Conflict {
                scenario_id: s.id,
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_save_unknown_is_not_found() {
        let store = InMemoryScenarioRepository::new();
        let s = make("urcea", "caphiria");
        assert_eq!(store.save(s.clone(), 1), Err(RepositoryError::NotFound(s.id)));
    }

    #[test]
    fn test_candidates_filtered_by_country_and_status() {
        let store = InMemoryScenarioRepository::new();
        let a = make("urcea", "caphiria");
        let b = make("burania", "caphiria");
        let mut c = make("urcea", "burania");
        c.status = ScenarioStatus::Declined;
        for s in [&a, &b, &c] {
            store.insert(s.clone()).unwrap();
        }

        let urcea = CountryId::new("urcea").unwrap();
        let found = store
            .find_candidates(&CandidateFilter::open_for(urcea, now()))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, a.id);

        let all = store.find_candidates(&CandidateFilter::default()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_due_filter() {
        let store = InMemoryScenarioRepository::new();
        let s = make("urcea", "caphiria");
        store.insert(s.clone()).unwrap();
        assert!(store.find_candidates(&CandidateFilter::due(now())).unwrap().is_empty());
        let due = store
            .find_candidates(&CandidateFilter::due(s.expires_at))
            .unwrap();
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemoryScenarioRepository::new();
        let other = store.clone();
        store.insert(make("urcea", "caphiria")).unwrap();
        assert_eq!(other.len(), 1);
    }
}
