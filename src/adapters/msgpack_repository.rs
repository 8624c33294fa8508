//! MessagePack implementation of the Q-table repository.
//!
//! This adapter implements the QTableRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::QTableRepository, q_learning::QTable};

/// MessagePack-based Q-table repository.
///
/// Provides persistent storage using the MessagePack binary format via
/// rmp_serde, so trained tables survive between training runs.
///
/// # Examples
///
/// ```no_run
/// use oxo::adapters::MsgPackRepository;
/// use oxo::ports::QTableRepository;
/// use oxo::q_learning::QTable;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let table = QTable::default();
///
/// // Save the table
/// repo.save(&table, Path::new("trained.msgpack"))?;
///
/// // Load it back
/// let loaded = repo.load(Path::new("trained.msgpack"))?;
/// # Ok::<(), oxo::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl QTableRepository for MsgPackRepository {
    fn save(&self, q_table: &QTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, q_table).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<QTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let q_table =
            rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
                operation: "deserialize Q-table from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        Ok(q_table)
    }
}
