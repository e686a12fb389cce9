//! Repository contract for saving and loading characters.

use progression_core::{CharacterId, CharacterSave};

use super::Result;

/// Repository for character persistence.
///
/// Stores the logical save record only; resolving it against the content
/// catalog (clamping, dropping stale references) happens in the session.
pub trait SaveRepository: Send + Sync {
    /// Save a character, replacing any previous record.
    fn save(&self, record: &CharacterSave) -> Result<()>;

    /// Load a character record.
    fn load(&self, id: CharacterId) -> Result<Option<CharacterSave>>;

    /// Check if a record exists
    fn exists(&self, id: CharacterId) -> bool;

    /// Delete a record
    fn delete(&self, id: CharacterId) -> Result<()>;

    /// List all stored character ids, ascending.
    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        Ok(vec![])
    }
}
