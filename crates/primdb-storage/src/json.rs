//! JSON document store
//!
//! Implements [`TableStore`] over plain files. A missing document reads as
//! empty. A document that fails to parse also reads as empty, with a
//! warning, so one damaged table does not lock the user out of the rest.

use crate::StorageConfig;
use primdb_core::security::validate_table_name;
use primdb_core::{Error, Result, Row, Schema, TableStore, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension for row documents
const TABLE_EXTENSION: &str = "json";
/// Extension for in-flight writes
const TMP_EXTENSION: &str = "tmp";

/// File-backed table store
#[derive(Debug, Clone)]
pub struct JsonStore {
    /// Database directory
    dir: PathBuf,
    /// Configuration
    config: StorageConfig,
}

impl JsonStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, StorageConfig::default())
    }

    /// Open or create a store with custom configuration
    pub fn open_with_config(path: impl AsRef<Path>, config: StorageConfig) -> Result<Self> {
        let dir = path.as_ref().to_path_buf();
        fs::create_dir_all(dir.join(&config.data_dir))?;
        debug!(dir = %dir.display(), "opened json store");
        Ok(Self { dir, config })
    }

    /// Path of the schema document
    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(&self.config.metadata_file)
    }

    /// Path of a table's row document
    pub fn table_path(&self, table: &str) -> Result<PathBuf> {
        validate_table_name(table)?;
        Ok(self
            .dir
            .join(&self.config.data_dir)
            .join(format!("{}.{}", table, TABLE_EXTENSION)))
    }

    fn read_document<T: DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };

        if contents.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        match serde_json::from_slice(&contents) {
            Ok(document) => Ok(document),
            Err(e) => {
                // Fall back to an empty document
                warn!(path = %path.display(), error = %e, "unreadable document, treating as empty");
                Ok(T::default())
            }
        }
    }

    fn write_document<T: Serialize + ?Sized>(&self, path: &Path, document: &T) -> Result<()> {
        let encoded = if self.config.pretty {
            serde_json::to_vec_pretty(document)
        } else {
            serde_json::to_vec(document)
        }
        .map_err(|e| Error::Serialization(e.to_string()))?;

        let tmp_path = path.with_extension(TMP_EXTENSION);
        fs::write(&tmp_path, &encoded)?;
        fs::rename(&tmp_path, path)?;
        debug!(path = %path.display(), bytes = encoded.len(), "wrote document");
        Ok(())
    }
}

/// serde_json writes non-finite floats as `null`, which reads back as a
/// corrupt document.
fn check_finite(rows: &[Row]) -> Result<()> {
    for row in rows {
        for (column, value) in row.iter() {
            if let Value::Float(f) = value {
                if !f.is_finite() {
                    return Err(Error::Serialization(format!(
                        "column '{}' holds {}, which has no JSON representation",
                        column, f
                    )));
                }
            }
        }
    }
    Ok(())
}

impl TableStore for JsonStore {
    fn load(&self, table: &str) -> Result<Vec<Row>> {
        let path = self.table_path(table)?;
        self.read_document(&path)
    }

    fn save(&mut self, table: &str, rows: &[Row]) -> Result<()> {
        let path = self.table_path(table)?;
        check_finite(rows)?;
        self.write_document(&path, rows)
    }

    fn load_metadata(&self) -> Result<Schema> {
        self.read_document(&self.metadata_path())
    }

    fn save_metadata(&mut self, schema: &Schema) -> Result<()> {
        self.write_document(&self.metadata_path(), schema)
    }

    fn remove(&mut self, table: &str) -> Result<()> {
        let path = self.table_path(table)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
