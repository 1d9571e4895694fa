//! The schema provider contract and the raw description records it supplies.
//!
//! A provider is anything that can describe a server's databases: a live
//! introspection client, a snapshot file, or a hand-built fixture. The
//! catalog loader consumes these plain records in one pass and freezes them
//! into the typed metadata model; providers are never called again after
//! that.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ValueType;

/// Raw description of one database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseDef {
    /// Database name.
    pub name: String,
    /// Table descriptions.
    pub tables: Vec<TableDef>,
    /// View descriptions.
    pub views: Vec<ViewDef>,
}

/// Raw description of one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name.
    pub name: String,
    /// Schema qualifier, if any.
    pub schema: Option<String>,
    /// Ordered column descriptions; position becomes the field index.
    pub columns: Vec<ColumnDef>,
    /// Constraint descriptions.
    pub constraints: Vec<ConstraintDef>,
}

/// Raw description of one view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDef {
    /// View name.
    pub name: String,
    /// Schema qualifier, if any.
    pub schema: Option<String>,
    /// Ordered column descriptions; position becomes the field index.
    pub columns: Vec<ColumnDef>,
}

/// Raw description of one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Portable type code.
    pub value_type: ValueType,
    /// Dialect-specific type name as reported by the server.
    pub native_type: String,
    /// Maximum length for sized types.
    #[serde(default)]
    pub max_length: Option<u32>,
    /// Whether the column accepts NULL.
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column is an identity/auto-generated column.
    #[serde(default)]
    pub identity: bool,
    /// Whether the column is computed or otherwise not writable.
    #[serde(default)]
    pub read_only: bool,
    /// Whether the column has a server-side default.
    #[serde(default)]
    pub has_default: bool,
}

impl ColumnDef {
    /// Creates a minimal writable, non-nullable column description.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            native_type: String::new(),
            max_length: None,
            nullable: false,
            identity: false,
            read_only: false,
            has_default: false,
        }
    }

    /// Marks the column as an identity column.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Marks the column as nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as read-only.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Marks the column as having a server-side default.
    #[must_use]
    pub const fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// Constraint kind as described by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKindDef {
    /// Primary key.
    PrimaryKey,
    /// Unique key.
    UniqueKey,
    /// Foreign key.
    ForeignKey,
}

/// Raw description of one constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintDef {
    /// Constraint name.
    pub name: String,
    /// Constraint kind.
    pub kind: ConstraintKindDef,
    /// Ordered constrained column names.
    pub columns: Vec<String>,
    /// Foreign-key target; required iff `kind` is `ForeignKey`.
    #[serde(default)]
    pub references: Option<ForeignRefDef>,
}

/// Foreign-key target description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignRefDef {
    /// Referenced table name.
    pub table: String,
    /// Referenced column names, paired positionally with the local columns.
    pub columns: Vec<String>,
}

/// Supplies raw schema descriptions for a source server.
///
/// Results are treated as finite, already-validated in-memory structures;
/// the loader performs structural validation (ownership, name resolution)
/// but never re-queries.
pub trait SchemaProvider {
    /// Returns the database names owned by the named source.
    fn database_names(&self, source: &str) -> Result<Vec<String>>;

    /// Returns the full description of one database.
    fn describe_database(&self, source: &str, database: &str) -> Result<DatabaseDef>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_def_loads_from_snapshot_json() {
        let json = r#"{
            "name": "shop",
            "tables": [{
                "name": "customers",
                "schema": "dbo",
                "columns": [
                    {"name": "id", "value_type": "Int64", "native_type": "bigint", "identity": true},
                    {"name": "name", "value_type": "Text", "native_type": "nvarchar", "max_length": 200}
                ],
                "constraints": [{
                    "name": "pk_customers",
                    "kind": "PrimaryKey",
                    "columns": ["id"]
                }]
            }],
            "views": []
        }"#;
        let def: DatabaseDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.tables.len(), 1);
        let table = &def.tables[0];
        assert!(table.columns[0].identity);
        assert!(!table.columns[0].nullable);
        assert_eq!(table.columns[1].max_length, Some(200));
        assert_eq!(table.constraints[0].kind, ConstraintKindDef::PrimaryKey);
        assert!(table.constraints[0].references.is_none());
    }

    #[test]
    fn test_column_def_round_trips() {
        let column = ColumnDef::new("total", ValueType::Decimal)
            .nullable()
            .with_default();
        let json = serde_json::to_string(&column).unwrap();
        let back: ColumnDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "total");
        assert_eq!(back.value_type, ValueType::Decimal);
        assert!(back.nullable);
        assert!(back.has_default);
        assert!(!back.identity);
    }
}
