//! File-based ModifierRepository implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use battle_core::Stage;
use serde::{Deserialize, Serialize};

use super::{ModifierRepository, RepositoryError, Result};

/// Everything stored for one run.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RunRecord {
    run_id: String,
    stages: BTreeMap<Stage, Vec<String>>,
}

/// File-based implementation of ModifierRepository.
///
/// Each run is stored as `run_{run_id}.json` under the base directory. Writes
/// go to a temp file first and are renamed into place.
pub struct FileModifierRepository {
    base_dir: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileModifierRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn run_path(&self, run_id: &str) -> PathBuf {
        let safe: String = run_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_dir.join(format!("run_{safe}.json"))
    }

    fn read(&self, run_id: &str) -> Result<RunRecord> {
        let path = self.run_path(run_id);
        if !path.exists() {
            return Ok(RunRecord {
                run_id: run_id.to_owned(),
                ..RunRecord::default()
            });
        }
        let bytes = fs::read(&path)?;
        let record: RunRecord = serde_json::from_slice(&bytes)?;
        if record.run_id != run_id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds run '{}', expected '{}'",
                path.display(),
                record.run_id,
                run_id
            )));
        }
        Ok(record)
    }

    fn write(&self, record: &RunRecord) -> Result<()> {
        let path = self.run_path(&record.run_id);
        let temp_path = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(record)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;
        tracing::debug!("Saved run[{}] to {}", record.run_id, path.display());
        Ok(())
    }

    fn update(&self, run_id: &str, change: impl FnOnce(&mut RunRecord)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut record = self.read(run_id)?;
        change(&mut record);
        self.write(&record)
    }
}

impl ModifierRepository for FileModifierRepository {
    fn get_modifiers(&self, run_id: &str, stage: Stage) -> Result<Vec<String>> {
        let mut record = self.read(run_id)?;
        Ok(record.stages.remove(&stage).unwrap_or_default())
    }

    fn add_modifier(&self, run_id: &str, talent: &str, stage: Stage) -> Result<()> {
        self.update(run_id, |record| {
            record
                .stages
                .entry(stage)
                .or_default()
                .push(talent.to_owned());
        })
    }

    fn clear_modifiers(&self, run_id: &str, stage: Stage) -> Result<()> {
        if !self.run_path(run_id).exists() {
            return Ok(());
        }
        self.update(run_id, |record| {
            record.stages.remove(&stage);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_ids_are_sanitized_into_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileModifierRepository::new(dir.path()).unwrap();
        assert_eq!(
            repo.run_path("../evil run"),
            dir.path().join("run____evil_run.json")
        );
    }

    #[test]
    fn clearing_a_missing_run_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileModifierRepository::new(dir.path()).unwrap();
        repo.clear_modifiers("ghost", Stage::FIRST).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn corrupted_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileModifierRepository::new(dir.path()).unwrap();
        fs::write(repo.run_path("r1"), b"{not json").unwrap();
        assert!(matches!(
            repo.get_modifiers("r1", Stage::FIRST),
            Err(RepositoryError::Json(_))
        ));
    }
}
