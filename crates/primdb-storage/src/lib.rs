//! # PrimDB Storage
//!
//! JSON file persistence for PrimDB.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of PrimDB.**
//! Depend on the main `primdb` crate instead.
//!
//! ---
//!
//! One database is one directory:
//!
//! ```text
//! <root>/
//!   metadata.json        table name -> {"columns": {name: type}}
//!   data/
//!     <table>.json       [ {"ID": 1, ...}, ... ]
//! ```
//!
//! Every write replaces a whole document: the new content is written to a
//! `.tmp` sibling and renamed over the target.

pub mod json;

pub use json::JsonStore;

/// Default schema document file name
pub const DEFAULT_METADATA_FILE: &str = "metadata.json";

/// Default directory for row documents
pub const DEFAULT_DATA_DIR: &str = "data";

/// JSON store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Schema document file name, relative to the database root
    pub metadata_file: String,
    /// Row document directory, relative to the database root
    pub data_dir: String,
    /// Write indented JSON
    pub pretty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            pretty: true,
        }
    }
}

impl StorageConfig {
    /// Use compact single-line JSON
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Default::default()
        }
    }

    /// Set the schema document file name
    pub fn with_metadata_file<S: Into<String>>(mut self, name: S) -> Self {
        self.metadata_file = name.into();
        self
    }

    /// Set the row document directory
    pub fn with_data_dir<S: Into<String>>(mut self, dir: S) -> Self {
        self.data_dir = dir.into();
        self
    }
}
