//! # dalgen-schema
//!
//! A typed, read-only metadata model of a relational schema: sources,
//! databases, tables, views, fields, and constraints.
//!
//! Metadata enters through a [`SchemaProvider`] as plain description
//! records and is frozen by the catalog loader in one pass. Loading
//! validates ownership and name resolution up front and builds the reverse
//! foreign-key index (`referenced field -> referencing fields`) once, so
//! every accessor afterwards is a pure lookup.
//!
//! ```rust
//! use dalgen_schema::{ColumnDef, Database, DatabaseDef, TableDef, ValueType};
//!
//! let def = DatabaseDef {
//!     name: "shop".into(),
//!     tables: vec![TableDef {
//!         name: "customers".into(),
//!         schema: None,
//!         columns: vec![ColumnDef::new("id", ValueType::Int64).identity()],
//!         constraints: vec![],
//!     }],
//!     views: vec![],
//! };
//!
//! let db = Database::from_def(&def).unwrap();
//! assert!(db.table_by_name("Customers").is_some());
//! ```

pub mod catalog;
pub mod constraint;
pub mod data;
pub mod error;
pub mod ident;
pub mod mask;
pub mod provider;
pub mod types;

pub use catalog::{Database, Source};
pub use constraint::{Constraint, ConstraintKind};
pub use data::{DataEntity, FieldId, Table, TableField, TableId, View, ViewField, ViewId};
pub use error::{Result, SchemaError};
pub use ident::{Ident, QualifiedName};
pub use mask::{FieldMask, MAX_MASK_FIELDS};
pub use provider::{
    ColumnDef, ConstraintDef, ConstraintKindDef, DatabaseDef, ForeignRefDef, SchemaProvider,
    TableDef, ViewDef,
};
pub use types::{Credential, ValueType};
