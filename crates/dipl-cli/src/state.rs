//! # JSON Directory Repository
//!
//! Scenario state stored as one pretty-printed JSON file per scenario,
//! `<state_dir>/<scenario_id>.json`:
//!
//! ```json
//! { "version": 2, "scenario": { "id": "...", "status": "completed", ... } }
//! ```
//!
//! Writes go to a temporary file that is then renamed over the target, so a
//! reader never sees a half-written scenario. Version checks are serialized
//! within one process by a lock; separate `dipl` processes sharing a state
//! directory are not coordinated.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use dipl_core::ScenarioId;
use dipl_scenario::Scenario;
use dipl_service::{CandidateFilter, RepositoryError, ScenarioRepository, Versioned};

/// On-disk shape of a scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub version: u64,
    pub scenario: Scenario,
}

/// [`ScenarioRepository`] over a directory of JSON files.
#[derive(Debug)]
pub struct JsonDirRepository {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDirRepository {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &ScenarioId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn read_file(&self, path: &Path) -> Result<ScenarioFile, RepositoryError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| backend(format!("failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| backend(format!("failed to parse {}: {e}", path.display())))
    }

    fn write_file(&self, file: &ScenarioFile) -> Result<(), RepositoryError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            backend(format!(
                "failed to create state directory {}: {e}",
                self.dir.display()
            ))
        })?;
        let target = self.path_for(&file.scenario.id);
        let tmp = target.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(file)
            .map_err(|e| backend(format!("failed to serialize scenario: {e}")))?;
        std::fs::write(&tmp, json)
            .map_err(|e| backend(format!("failed to write {}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &target)
            .map_err(|e| backend(format!("failed to replace {}: {e}", target.display())))?;
        tracing::debug!(path = %target.display(), version = file.version, "wrote scenario file");
        Ok(())
    }

    /// Every readable scenario file. Unreadable entries are logged and skipped.
    fn load_all(&self) -> Result<Vec<ScenarioFile>, RepositoryError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            backend(format!(
                "failed to read state directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        dir = %self.dir.display(),
                        error = %e,
                        "failed to read directory entry while listing scenarios"
                    );
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_file(&path) {
                Ok(file) => files.push(file),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable scenario file"),
            }
        }
        Ok(files)
    }
}

fn backend(msg: String) -> RepositoryError {
    RepositoryError::Backend(msg)
}

impl ScenarioRepository for JsonDirRepository {
    fn find_by_id(&self, id: &ScenarioId) -> Result<Option<Versioned<Scenario>>, RepositoryError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let file = self.read_file(&path)?;
        Ok(Some(Versioned {
            value: file.scenario,
            version: file.version,
        }))
    }

    fn find_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Scenario>, RepositoryError> {
        let mut found: Vec<Scenario> = self
            .load_all()?
            .into_iter()
            .map(|f| f.scenario)
            .filter(|s| filter.matches(s))
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    fn insert(&self, scenario: Scenario) -> Result<u64, RepositoryError> {
        let _guard = self.write_lock.lock();
        if self.path_for(&scenario.id).exists() {
            return Err(RepositoryError::Duplicate(scenario.id));
        }
        self.write_file(&ScenarioFile {
            version: 1,
            scenario,
        })?;
        Ok(1)
    }

    fn save(&self, scenario: Scenario, expected_version: u64) -> Result<u64, RepositoryError> {
        let _guard = self.write_lock.lock();
        let path = self.path_for(&scenario.id);
        if !path.exists() {
            return Err(RepositoryError::NotFound(scenario.id));
        }
        let current = self.read_file(&path)?;
        if current.version != expected_version {
            return Err(RepositoryError::Conflict {
                scenario_id: scenario.id,
                expected: expected_version,
                found: current.version,
            });
        }
        let version = current.version + 1;
        self.write_file(&ScenarioFile { version, scenario })?;
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use dipl_core::{CountryId, FixedClock, ScriptedRandom, Timestamp};
    use dipl_scenario::{
        CountryRef, FactoryConfig, ScenarioFactory, ScenarioRequest, ScenarioStatus,
    };

    fn make(c1: &str, c2: &str) -> Scenario {
        let mut f = ScenarioFactory::new(
            FactoryConfig::default(),
            Arc::new(FixedClock::new(
                Timestamp::parse("2026-05-01T09:00:00Z").unwrap(),
            )),
            ScriptedRandom::constant(0.3),
        )
        .unwrap();
        f.create_scenario(ScenarioRequest::between(
            CountryRef::new(CountryId::new(c1).unwrap(), c1),
            CountryRef::new(CountryId::new(c2).unwrap(), c2),
        ))
        .unwrap()
    }

    #[test]
    fn insert_writes_versioned_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(dir.path().join("scenarios"));
        let s = make("urcea", "caphiria");
        assert_eq!(repo.insert(s.clone()).unwrap(), 1);

        let content =
            std::fs::read_to_string(dir.path().join("scenarios").join(format!("{}.json", s.id)))
                .unwrap();
        let file: ScenarioFile = serde_json::from_str(&content).unwrap();
        assert_eq!(file.version, 1);
        assert_eq!(file.scenario, s);

        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(raw["scenario"]["status"], "active");
        assert_eq!(raw["scenario"]["type"], s.scenario_type.as_str());
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(dir.path().join("absent"));
        assert!(repo.find_candidates(&CandidateFilter::default()).unwrap().is_empty());
        assert!(repo.find_by_id(&ScenarioId::new()).unwrap().is_none());
    }

    #[test]
    fn save_checks_version() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(dir.path());
        let mut s = make("urcea", "caphiria");
        repo.insert(s.clone()).unwrap();
        assert!(matches!(
            repo.insert(s.clone()),
            Err(RepositoryError::Duplicate(_))
        ));

        s.status = ScenarioStatus::Pending;
        assert_eq!(repo.save(s.clone(), 1).unwrap(), 2);
        assert!(matches!(
            repo.save(s.clone(), 1),
            Err(RepositoryError::Conflict { expected: 1, found: 2, .. })
        ));

        let stored = repo.find_by_id(&s.id).unwrap().unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(stored.value.status, ScenarioStatus::Pending);
    }

    #[test]
    fn save_unknown_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(dir.path());
        let s = make("urcea", "caphiria");
        assert!(matches!(
            repo.save(s, 1),
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[test]
    fn candidates_skip_foreign_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(dir.path());
        let a = make("urcea", "caphiria");
        let b = make("burania", "caphiria");
        repo.insert(a.clone()).unwrap();
        repo.insert(b).unwrap();
        std::fs::write(dir.path().join("notes.md"), b"# notes").unwrap();
        std::fs::write(dir.path().join("bad.json"), b"not valid json").unwrap();

        assert_eq!(repo.find_candidates(&CandidateFilter::default()).unwrap().len(), 2);

        let filter = CandidateFilter {
            country: Some(CountryId::new("urcea").unwrap()),
            ..CandidateFilter::default()
        };
        let found = repo.find_candidates(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, a.id);
    }
}
