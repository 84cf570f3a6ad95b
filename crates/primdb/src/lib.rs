//! # PrimDB
//!
//! A minimal embedded record store with typed tables, a small command
//! language and JSON persistence.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use primdb::{AlwaysConfirm, Database};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Tables and rows survive restarts
//!     let mut db = Database::open("./my_database")?;
//!
//!     db.execute("create_table users name:str age:int", &mut AlwaysConfirm)?;
//!     db.execute("insert into users values (\"Alice\", 30)", &mut AlwaysConfirm)?;
//!
//!     let found = db.execute("select from users where age=30", &mut AlwaysConfirm)?;
//!     println!("{}", found);
//!     Ok(())
//! }
//! ```
//!
//! ## Database Modes
//!
//! ```rust
//! use primdb::Database;
//!
//! // In-memory database (data lost on drop)
//! let mut db = Database::in_memory();
//! db.create_table("users", &["name:str"])?;
//! # Ok::<(), primdb::Error>(())
//! ```
//!
//! ## Commands
//!
//! ```text
//! create_table <name> <col:type> [<col:type> ...]
//! drop_table <name>
//! list_tables
//! insert into <name> values (<v1>, <v2>, ...)
//! select from <name> [where <col>=<value>]
//! update <name> set <col>=<value>[, ...] where <col>=<value>
//! delete from <name> where <col>=<value>
//! info <name>
//! ```

use std::path::Path;
use tracing::{debug, info};

pub mod confirm;
pub mod logging;
pub mod output;
pub mod timing;

// Re-export core types
pub use primdb_core::{
    Assignments, CachePolicy, CacheStats, ColumnDef, DataType, Error, FilterClause, Inserted,
    MemoryStore, Result, Row, Statement, TableList, TableSchema, TableStore, Value, ID_COLUMN,
};
pub use primdb_core::query::{parse_assignments, parse_filter};

// Storage components
pub use primdb_storage::{JsonStore, StorageConfig};

pub use confirm::{AlwaysConfirm, Confirm};
pub use output::{render, Output};

use primdb_core::query::Parser;
use primdb_core::security::{validate_command, validate_table_name};
use primdb_core::{RecordStore, Schema, SchemaRegistry};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Database configuration
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// JSON store layout, ignored for in-memory databases
    pub storage: StorageConfig,
    /// How the select cache reacts to writes
    pub cache_policy: CachePolicy,
}

impl DatabaseConfig {
    /// Set the select cache policy
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Set the storage configuration
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }
}

/// The main database handle.
///
/// Owns the schema registry, the record store with its select cache and
/// the persistence backend. Every mutating operation is written through to
/// the backend before it returns.
///
/// # Examples
///
/// ```rust,no_run
/// use primdb::{parse_filter, Database};
///
/// let mut db = Database::open("./my_data")?;
/// db.create_table("users", &["name:str", "age:int"])?;
/// db.insert("users", &["\"Alice\"", "30"])?;
///
/// // Data persists across restarts
/// drop(db);
/// let mut db = Database::open("./my_data")?;
/// let filter = parse_filter("name=Alice")?;
/// assert_eq!(db.select("users", filter.as_ref())?.len(), 1);
/// # Ok::<(), primdb::Error>(())
/// ```
pub struct Database {
    registry: SchemaRegistry,
    store: RecordStore,
    backend: Box<dyn TableStore>,
    persistent: bool,
}

impl Database {
    /// Opens a persistent database at the specified path.
    ///
    /// Creates the directory if it doesn't exist and loads the schema
    /// document.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, DatabaseConfig::default())
    }

    /// Opens a persistent database with custom configuration.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: DatabaseConfig) -> Result<Self> {
        let backend = JsonStore::open_with_config(path.as_ref(), config.storage)?;
        let db = Self::with_backend(Box::new(backend), config.cache_policy, true)?;
        info!(
            path = %path.as_ref().display(),
            tables = db.registry.schema().len(),
            "opened database"
        );
        Ok(db)
    }

    /// Creates an in-memory database.
    ///
    /// Data is lost when the database is dropped.
    pub fn in_memory() -> Self {
        Self::in_memory_with_config(DatabaseConfig::default())
    }

    /// Creates an in-memory database with custom configuration.
    pub fn in_memory_with_config(config: DatabaseConfig) -> Self {
        Self {
            registry: SchemaRegistry::new(),
            store: RecordStore::new(config.cache_policy),
            backend: Box::new(MemoryStore::new()),
            persistent: false,
        }
    }

    fn with_backend(
        backend: Box<dyn TableStore>,
        cache_policy: CachePolicy,
        persistent: bool,
    ) -> Result<Self> {
        let schema = backend.load_metadata()?;
        Ok(Self {
            registry: SchemaRegistry::from_schema(schema),
            store: RecordStore::new(cache_policy),
            backend,
            persistent,
        })
    }

    /// Creates a table with an implicit leading `ID:int` column.
    ///
    /// The empty row collection is written before the schema document, and
    /// the registry is only updated once both writes succeeded. A failure
    /// leaves the table unregistered both in memory and on disk.
    pub fn create_table<S: AsRef<str>>(&mut self, name: &str, column_specs: &[S]) -> Result<String> {
        validate_table_name(name)?;
        let mut registry = self.registry.clone();
        let message = registry.create_table(name, column_specs)?;

        self.backend.save(name, &[])?;
        self.backend.save_metadata(registry.schema())?;
        self.registry = registry;
        self.store.table_changed(name);
        Ok(message)
    }

    /// Drops a table together with its rows. Unconditional; confirmation
    /// only happens in [`Database::execute`].
    ///
    /// The table is gone once the schema document is written. A failure to
    /// remove the rows afterwards is reported, but the table stays dropped;
    /// the leftover rows are overwritten if the table is created again.
    pub fn drop_table(&mut self, name: &str) -> Result<String> {
        let mut registry = self.registry.clone();
        let message = registry.drop_table(name)?;

        self.backend.save_metadata(registry.schema())?;
        self.registry = registry;
        self.store.table_changed(name);
        self.backend.remove(name)?;
        Ok(message)
    }

    /// Table names in lexicographic order.
    pub fn list_tables(&self) -> TableList {
        self.registry.list_tables()
    }

    /// Inserts one row from raw value tokens, coerced against the table's
    /// declared columns in order.
    pub fn insert<S: AsRef<str>>(&mut self, table: &str, values: &[S]) -> Result<Inserted> {
        self.registry.table(table)?;
        let mut rows = self.backend.load(table)?;
        let inserted = self
            .store
            .insert(self.registry.schema(), table, &mut rows, values)?;
        self.backend.save(table, &rows)?;
        Ok(inserted)
    }

    /// Rows matching `filter`, or every row when there is none.
    pub fn select(&mut self, table: &str, filter: Option<&FilterClause>) -> Result<Vec<Row>> {
        self.registry.table(table)?;
        let rows = self.backend.load(table)?;
        Ok(self.store.select(table, &rows, filter))
    }

    /// Applies `assignments` to matching rows and returns how many matched.
    pub fn update(
        &mut self,
        table: &str,
        assignments: &Assignments,
        filter: &FilterClause,
    ) -> Result<usize> {
        self.registry.table(table)?;
        let mut rows = self.backend.load(table)?;
        let updated = self.store.update(table, &mut rows, assignments, filter);
        self.backend.save(table, &rows)?;
        Ok(updated)
    }

    /// Removes matching rows and returns how many were removed.
    /// Unconditional; confirmation only happens in [`Database::execute`].
    pub fn delete(&mut self, table: &str, filter: &FilterClause) -> Result<usize> {
        self.registry.table(table)?;
        let rows = self.backend.load(table)?;
        let before = rows.len();
        let remaining = self.store.delete(table, rows, filter);
        self.backend.save(table, &remaining)?;
        Ok(before - remaining.len())
    }

    /// Column list and row count of a table.
    pub fn info(&self, table: &str) -> Result<String> {
        self.registry.table(table)?;
        let rows = self.backend.load(table)?;
        self.store.info(self.registry.schema(), table, &rows)
    }

    /// Parses and runs one command.
    ///
    /// `delete` and `drop_table` ask `confirm` first; a declined prompt
    /// returns [`Output::Cancelled`] and changes nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use primdb::{render, Database, Output};
    ///
    /// let mut db = Database::in_memory();
    /// db.execute("create_table users name:str", &mut |_: &str| true)?;
    /// let out = db.execute("drop_table users", &mut |_: &str| false)?;
    /// assert_eq!(out, Output::Cancelled);
    /// assert_eq!(render(&db.execute("list_tables", &mut |_: &str| true)), "- users");
    /// # Ok::<(), primdb::Error>(())
    /// ```
    pub fn execute(&mut self, command: &str, confirm: &mut dyn Confirm) -> Result<Output> {
        validate_command(command)?;
        let statement = Parser::new(command).parse()?;
        debug!(statement = %statement, "executing");

        if let Some(action) = statement.destructive_action() {
            if !confirm.confirm(&confirm::prompt_for(action)) {
                info!(statement = %statement, "cancelled by user");
                return Ok(Output::Cancelled);
            }
        }

        match statement {
            Statement::CreateTable { name, columns } => {
                self.create_table(&name, columns.as_slice()).map(Output::Message)
            }
            Statement::DropTable { name } => self.drop_table(&name).map(Output::Message),
            Statement::ListTables => Ok(Output::Tables(self.list_tables())),
            Statement::Insert { table, values } => timing::timed("insert", || {
                self.insert(&table, values.as_slice())
                    .map(|inserted| Output::Message(inserted.to_string()))
            }),
            Statement::Select { table, filter } => timing::timed("select", || {
                self.select(&table, filter.as_ref()).map(Output::Rows)
            }),
            Statement::Update {
                table,
                assignments,
                filter,
            } => {
                let count = self.update(&table, &assignments, &filter)?;
                Ok(Output::Updated { table, count })
            }
            Statement::Delete { table, filter } => {
                let count = self.delete(&table, &filter)?;
                Ok(Output::Deleted { table, count })
            }
            Statement::Info { table } => self.info(&table).map(Output::Message),
        }
    }

    /// The current schema.
    pub fn schema(&self) -> &Schema {
        self.registry.schema()
    }

    /// Select cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.store.cache_stats()
    }

    /// The select cache policy.
    pub fn cache_policy(&self) -> CachePolicy {
        self.store.cache_policy()
    }

    /// Returns true if this database writes to disk.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_in_memory_database() {
        let mut db = Database::in_memory();
        assert!(!db.is_persistent());
        db.create_table("users", &["name:str", "age:int"]).unwrap();
        let inserted = db.insert("users", &["Alice", "30"]).unwrap();
        assert_eq!(inserted.id, 1);
        assert_eq!(db.select("users", None).unwrap().len(), 1);
    }

    #[test]
    fn test_persistent_database() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(dir.path()).unwrap();
        assert!(db.is_persistent());
        db.create_table("users", &["name:str"]).unwrap();
        assert!(dir.path().join("metadata.json").exists());
        assert!(dir.path().join("data").join("users.json").exists());
    }

    #[test]
    fn test_failed_create_leaves_schema_unchanged() {
        let mut db = Database::in_memory();
        db.create_table("users", &["name:str"]).unwrap();
        assert!(matches!(
            db.create_table("users", &["age:int"]),
            Err(Error::DuplicateTable(_))
        ));
        assert!(matches!(
            db.create_table("pets", &["name:str", "name:int"]),
            Err(Error::DuplicateColumn(_))
        ));
        assert_eq!(db.list_tables().names(), ["users".to_string()]);
        assert_eq!(
            db.info("users").unwrap(),
            "Table: users\nColumns: ID:int, name:str\nRecord count: 0"
        );
    }

    #[test]
    fn test_rejects_unsafe_table_names() {
        let mut db = Database::in_memory();
        assert!(matches!(
            db.create_table("../etc", &["name:str"]),
            Err(Error::InvalidInput(_))
        ));
        assert!(db.list_tables().is_empty());
    }

    #[test]
    fn test_operations_on_missing_table() {
        let mut db = Database::in_memory();
        let filter = FilterClause::new("ID", Value::Integer(1));
        assert!(matches!(db.select("ghosts", None), Err(Error::TableNotFound(_))));
        assert!(matches!(db.insert("ghosts", &["x"]), Err(Error::TableNotFound(_))));
        assert!(matches!(db.delete("ghosts", &filter), Err(Error::TableNotFound(_))));
        assert!(matches!(
            db.update("ghosts", &Assignments::new(), &filter),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(db.drop_table("ghosts"), Err(Error::TableNotFound(_))));
        assert!(matches!(db.info("ghosts"), Err(Error::TableNotFound(_))));
    }

    #[test]
    fn test_drop_table_forgets_rows() {
        let mut db = Database::in_memory();
        db.create_table("users", &["name:str"]).unwrap();
        db.insert("users", &["Alice"]).unwrap();
        db.drop_table("users").unwrap();
        db.create_table("users", &["name:str"]).unwrap();
        assert!(db.select("users", None).unwrap().is_empty());
        assert_eq!(db.insert("users", &["Bob"]).unwrap().id, 1);
    }

    #[test]
    fn test_failed_rows_write_keeps_table_unregistered() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data").join("users.json")).unwrap();

        let mut db = Database::open(dir.path()).unwrap();
        assert!(matches!(
            db.create_table("users", &["name:str"]),
            Err(Error::Io(_))
        ));
        assert!(db.list_tables().is_empty());

        drop(db);
        let db = Database::open(dir.path()).unwrap();
        assert!(db.list_tables().is_empty());
    }

    #[test]
    fn test_failed_rows_removal_still_drops_table() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(dir.path()).unwrap();
        db.create_table("users", &["name:str"]).unwrap();

        let rows_path = dir.path().join("data").join("users.json");
        std::fs::remove_file(&rows_path).unwrap();
        std::fs::create_dir_all(rows_path.join("blocker")).unwrap();

        assert!(matches!(db.drop_table("users"), Err(Error::Io(_))));
        assert!(db.list_tables().is_empty());

        drop(db);
        let db = Database::open(dir.path()).unwrap();
        assert!(db.list_tables().is_empty());
    }

    #[test]
    fn test_config_builders() {
        let config = DatabaseConfig::default()
            .with_cache_policy(CachePolicy::Unchecked)
            .with_storage(StorageConfig::compact());
        assert_eq!(config.cache_policy, CachePolicy::Unchecked);
        assert!(!config.storage.pretty);

        let db = Database::in_memory_with_config(config);
        assert_eq!(db.cache_policy(), CachePolicy::Unchecked);
    }
}
