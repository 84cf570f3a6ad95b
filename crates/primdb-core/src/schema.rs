//! Schema registry.
//!
//! The registry owns the schema document (table name to ordered column
//! definitions) and is the only code path that mutates it. Every table
//! carries an implicit leading `ID:int` column.

use crate::error::{Error, Result};
use crate::row::ID_COLUMN;
use crate::value::DataType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// A single column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name, unique within its table
    pub name: String,
    /// Declared type
    pub data_type: DataType,
}

impl ColumnDef {
    /// Creates a column definition.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Parses a `name:type` column spec.
    pub fn parse(spec: &str) -> Result<Self> {
        let (name, ty) = spec
            .split_once(':')
            .ok_or_else(|| Error::MalformedColumnSpec(spec.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyColumnName);
        }
        let data_type = ty.trim().parse::<DataType>()?;
        Ok(Self::new(name, data_type))
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.data_type)
    }
}

/// Columns of one table, `ID` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(with = "column_map")]
    columns: Vec<ColumnDef>,
}

impl TableSchema {
    fn with_user_columns(user_columns: Vec<ColumnDef>) -> Self {
        let mut columns = Vec::with_capacity(user_columns.len() + 1);
        columns.push(ColumnDef::new(ID_COLUMN, DataType::Integer));
        columns.extend(user_columns);
        Self { columns }
    }

    /// All columns including `ID`.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Columns supplied by the user on insert, i.e. everything after `ID`.
    pub fn user_columns(&self) -> &[ColumnDef] {
        self.columns
            .iter()
            .position(|c| c.name == ID_COLUMN)
            .map_or(&self.columns[..], |pos| &self.columns[pos + 1..])
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Renders the column list as `ID:int, name:str, ...`.
    pub fn describe_columns(&self) -> String {
        self.columns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Serializes columns as an ordered `{name: type}` map.
mod column_map {
    use super::ColumnDef;
    use crate::value::DataType;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(columns: &[ColumnDef], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(columns.len()))?;
        for column in columns {
            map.serialize_entry(&column.name, &column.data_type)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ColumnDef>, D::Error> {
        struct ColumnsVisitor;

        impl<'de> Visitor<'de> for ColumnsVisitor {
            type Value = Vec<ColumnDef>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to types")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut columns = Vec::new();
                while let Some((name, data_type)) = access.next_entry::<String, DataType>()? {
                    columns.push(ColumnDef { name, data_type });
                }
                Ok(columns)
            }
        }

        deserializer.deserialize_map(ColumnsVisitor)
    }
}

/// The persisted schema document: table name to table schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    tables: BTreeMap<String, TableSchema>,
}

impl Schema {
    /// Looks up a table.
    pub fn get(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// Returns true if the table exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no tables exist.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table names in lexicographic order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

/// Sorted table names, as returned by [`SchemaRegistry::list_tables`].
///
/// Displays as one `- name` line per table, or `No tables created.` when
/// the registry is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableList(Vec<String>);

impl TableList {
    /// The table names.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Returns true if there are no tables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "No tables created.");
        }
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "- {}", name)?;
        }
        Ok(())
    }
}

/// Owner of the schema document.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schema: Schema,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a previously loaded schema document.
    pub fn from_schema(schema: Schema) -> Self {
        Self { schema }
    }

    /// The current schema document.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Looks up a table's schema.
    pub fn table(&self, name: &str) -> Result<&TableSchema> {
        self.schema
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Registers a new table from `name:type` column specs.
    ///
    /// The registry is left untouched on any failure.
    pub fn create_table<S: AsRef<str>>(&mut self, name: &str, column_specs: &[S]) -> Result<String> {
        if self.schema.contains(name) {
            return Err(Error::DuplicateTable(name.to_string()));
        }

        let mut columns: Vec<ColumnDef> = Vec::with_capacity(column_specs.len());
        for spec in column_specs {
            let column = ColumnDef::parse(spec.as_ref())?;
            if column.name == ID_COLUMN || columns.iter().any(|c| c.name == column.name) {
                return Err(Error::DuplicateColumn(column.name));
            }
            columns.push(column);
        }

        let table = TableSchema::with_user_columns(columns);
        let message = format!(
            "Table \"{}\" created with columns: {}",
            name,
            table.describe_columns()
        );
        info!(table = name, columns = table.columns().len(), "created table");
        self.schema.tables.insert(name.to_string(), table);
        Ok(message)
    }

    /// Removes a table's schema.
    pub fn drop_table(&mut self, name: &str) -> Result<String> {
        if self.schema.tables.remove(name).is_none() {
            return Err(Error::TableNotFound(name.to_string()));
        }
        info!(table = name, "dropped table");
        Ok(format!("Table \"{}\" dropped", name))
    }

    /// Table names, sorted.
    pub fn list_tables(&self) -> TableList {
        TableList(self.schema.table_names().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_prepends_id() {
        let mut registry = SchemaRegistry::new();
        let msg = registry
            .create_table("users", &["name:str", "age:int", "active:bool"])
            .unwrap();
        assert_eq!(
            msg,
            "Table \"users\" created with columns: ID:int, name:str, age:int, active:bool"
        );

        let table = registry.table("users").unwrap();
        assert_eq!(table.columns().len(), 4);
        assert_eq!(table.columns()[0], ColumnDef::new("ID", DataType::Integer));
        assert_eq!(table.user_columns().len(), 3);
    }

    #[test]
    fn test_create_table_without_columns() {
        let mut registry = SchemaRegistry::new();
        registry.create_table::<&str>("empty", &[]).unwrap();
        assert_eq!(registry.table("empty").unwrap().describe_columns(), "ID:int");
    }

    #[test]
    fn test_duplicate_table_leaves_original() {
        let mut registry = SchemaRegistry::new();
        registry.create_table("users", &["name:str"]).unwrap();
        let before = registry.table("users").unwrap().clone();

        let err = registry.create_table("users", &["age:int"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateTable(ref t) if t == "users"));
        assert_eq!(registry.table("users").unwrap(), &before);
    }

    #[test]
    fn test_column_spec_errors() {
        let mut registry = SchemaRegistry::new();
        assert!(matches!(
            registry.create_table("t", &["name"]),
            Err(Error::MalformedColumnSpec(s)) if s == "name"
        ));
        assert!(matches!(
            registry.create_table("t", &[" :int"]),
            Err(Error::EmptyColumnName)
        ));
        assert!(matches!(
            registry.create_table("t", &["price:float"]),
            Err(Error::UnsupportedType(s)) if s == "float"
        ));
        assert!(matches!(
            registry.create_table("t", &["ID:int"]),
            Err(Error::DuplicateColumn(s)) if s == "ID"
        ));
        assert!(matches!(
            registry.create_table("t", &["a:int", "a:str"]),
            Err(Error::DuplicateColumn(s)) if s == "a"
        ));
        assert!(registry.schema().is_empty());
    }

    #[test]
    fn test_drop_table() {
        let mut registry = SchemaRegistry::new();
        registry.create_table("users", &["name:str"]).unwrap();
        registry.drop_table("users").unwrap();
        assert!(matches!(
            registry.drop_table("users"),
            Err(Error::TableNotFound(_))
        ));
    }

    #[test]
    fn test_list_tables_sorted() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.list_tables().is_empty());
        assert_eq!(registry.list_tables().to_string(), "No tables created.");

        registry.create_table::<&str>("orders", &[]).unwrap();
        registry.create_table::<&str>("accounts", &[]).unwrap();
        let list = registry.list_tables();
        assert_eq!(list.names(), &["accounts".to_string(), "orders".to_string()]);
        assert_eq!(list.to_string(), "- accounts\n- orders");
    }

    #[test]
    fn test_schema_json_shape() {
        let mut registry = SchemaRegistry::new();
        registry.create_table("users", &["name:str", "age:int"]).unwrap();

        let json = serde_json::to_string(registry.schema()).unwrap();
        assert_eq!(
            json,
            r#"{"users":{"columns":{"ID":"int","name":"str","age":"int"}}}"#
        );

        let back: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, registry.schema());
    }
}
