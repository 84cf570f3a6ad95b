// Common test utilities for PrimDB integration tests
#![allow(dead_code)]

use primdb::{AlwaysConfirm, Database, Output, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture that owns a temporary database directory
pub struct DbTestFixture {
    pub temp_dir: TempDir,
}

impl DbTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn open(&self) -> Database {
        Database::open(self.path()).expect("Failed to open database")
    }

    pub fn table_file(&self, table: &str) -> PathBuf {
        self.path().join("data").join(format!("{}.json", table))
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        let raw = fs::read_to_string(path).expect("Failed to read document");
        serde_json::from_str(&raw).expect("Document is not valid JSON")
    }
}

impl Default for DbTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a command that needs no confirmation decision
pub fn run(db: &mut Database, command: &str) -> Result<Output> {
    db.execute(command, &mut AlwaysConfirm)
}

/// In-memory database with `users(name:str, age:int)`
pub fn users_db() -> Database {
    let mut db = Database::in_memory();
    db.create_table("users", &["name:str", "age:int"])
        .expect("Failed to create users");
    db
}
