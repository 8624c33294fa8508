//! Repository port for Q-table persistence.
//!
//! This trait is the boundary between the learning algorithm and the storage
//! mechanism, so serialization formats can change without touching the agent.

use std::path::Path;

use crate::{Result, q_learning::QTable};

/// Port for persisting and loading Q-tables.
pub trait QTableRepository {
    /// Save a table to persistent storage, overwriting any existing resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, table: &QTable, path: &Path) -> Result<()>;

    /// Load a table from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is corrupted.
    fn load(&self, path: &Path) -> Result<QTable>;

    /// Load a table, treating a missing resource as an empty table.
    ///
    /// A persistence miss is not an error: a learner that has never been
    /// trained simply starts from scratch.
    fn load_or_default(&self, path: &Path) -> Result<QTable> {
        if path.exists() {
            self.load(path)
        } else {
            Ok(QTable::default())
        }
    }
}
