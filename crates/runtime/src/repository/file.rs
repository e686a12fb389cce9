//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use progression_core::{CharacterId, CharacterSave};

use super::{RepositoryError, Result, SaveRepository};

/// File-based implementation of SaveRepository.
///
/// Records are stored as `character_{id}.bin` in bincode format. Writes go to
/// a temporary file first and are renamed into place, so a crash mid-write
/// never leaves a truncated record behind.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, id: CharacterId) -> PathBuf {
        self.base_dir.join(format!("character_{}.bin", id.0))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, record: &CharacterSave) -> Result<()> {
        let path = self.record_path(record.id);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(record)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved character {} to {}", record.id, path.display());

        Ok(())
    }

    fn load(&self, id: CharacterId) -> Result<Option<CharacterSave>> {
        let path = self.record_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let record: CharacterSave = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", path.display(), e)))?;

        if record.id != id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds character {}",
                path.display(),
                record.id
            )));
        }

        tracing::debug!("Loaded character {} from {}", id, path.display());

        Ok(Some(record))
    }

    fn exists(&self, id: CharacterId) -> bool {
        self.record_path(id).exists()
    }

    fn delete(&self, id: CharacterId) -> Result<()> {
        let path = self.record_path(id);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted character {}", id);
        }

        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id_str) = filename
                    .strip_prefix("character_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(id) = id_str.parse::<u32>()
            {
                ids.push(CharacterId(id));
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progression_content::ContentFactory;
    use progression_core::Character;

    fn record(id: u32) -> CharacterSave {
        let catalog = ContentFactory::bundled().load_catalog().unwrap();
        CharacterSave::capture(&Character::new(CharacterId(id), &catalog))
    }

    #[test]
    fn save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        let mut saved = record(7);
        saved.level = 12;
        saved.learned = vec![("first_aid".into(), 1)];

        repo.save(&saved).unwrap();
        assert!(repo.exists(CharacterId(7)));
        assert_eq!(repo.load(CharacterId(7)).unwrap(), Some(saved));
        assert!(!dir.path().join("character_7.bin.tmp").exists());

        repo.delete(CharacterId(7)).unwrap();
        assert!(!repo.exists(CharacterId(7)));
        assert_eq!(repo.load(CharacterId(7)).unwrap(), None);
    }

    #[test]
    fn lists_ids_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        for id in [9, 2, 5] {
            repo.save(&record(id)).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        assert_eq!(
            repo.list_ids().unwrap(),
            vec![CharacterId(2), CharacterId(5), CharacterId(9)]
        );
    }

    #[test]
    fn truncated_record_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        std::fs::write(dir.path().join("character_3.bin"), [1, 2, 3]).unwrap();

        assert!(matches!(
            repo.load(CharacterId(3)),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
