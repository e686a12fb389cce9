//! Repository layer for character saves.
//!
//! Repositories handle data that CHANGES during play. Static content (jobs,
//! skills, biomes) is loaded once into the catalog, not stored here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepo;
pub use traits::SaveRepository;
