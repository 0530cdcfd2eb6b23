//! Persistence of selected talents, keyed by run and stage.
//!
//! Repositories store talent ids only. The manager rebuilds modifiers from the
//! catalog when a run is resumed, so stored data never carries behavior.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileModifierRepository;
pub use memory::InMemoryModifierRepo;
pub use traits::ModifierRepository;
