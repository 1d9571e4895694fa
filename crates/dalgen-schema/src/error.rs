//! Error types for schema loading and metadata access.

use thiserror::Error;

/// Errors raised while materializing or querying schema metadata.
///
/// Every variant names the offending object; loading fails fast on the
/// first violation rather than defaulting anything silently.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An entity was described without a name, so it cannot be attached to
    /// its owner.
    #[error("unnamed {kind} in '{owner}'")]
    Unnamed {
        /// Object kind ("table", "view", "field", "constraint").
        kind: &'static str,
        /// The owning object it was described under.
        owner: String,
    },

    /// Two sibling objects share a name (case-insensitive).
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName {
        /// Object kind ("table", "view", "field", "constraint").
        kind: &'static str,
        /// The colliding name.
        name: String,
    },

    /// A constraint referenced a table that does not exist in the database.
    #[error("constraint '{constraint}' references unknown table '{table}'")]
    UnknownTable {
        /// The constraint being resolved.
        constraint: String,
        /// The missing table name.
        table: String,
    },

    /// A constraint named a column its table does not have.
    #[error("constraint '{constraint}' references unknown field '{field}' on '{table}'")]
    UnknownField {
        /// The constraint being resolved.
        constraint: String,
        /// The owning table.
        table: String,
        /// The missing field name.
        field: String,
    },

    /// A constraint was described with an empty column list.
    #[error("constraint '{0}' has no fields")]
    EmptyConstraint(String),

    /// A foreign-key constraint lacked a referenced table.
    #[error("foreign key '{0}' has no reference table")]
    MissingReferenceTable(String),

    /// A foreign key pairs a different number of local and referenced columns.
    #[error("foreign key '{constraint}' pairs {local} local fields with {referenced} referenced fields")]
    ReferenceArityMismatch {
        /// The foreign-key constraint.
        constraint: String,
        /// Local column count.
        local: usize,
        /// Referenced column count.
        referenced: usize,
    },

    /// A table declared more than one primary-key constraint.
    #[error("table '{0}' declares more than one primary key")]
    MultiplePrimaryKeys(String),

    /// The entity has too many fields for bitmask-based field selection.
    #[error("'{entity}' has {count} fields; bitmask selection supports at most {max}")]
    TooManyFields {
        /// The data entity.
        entity: String,
        /// Its field count.
        count: usize,
        /// The supported ceiling.
        max: usize,
    },

    /// A bitmask named a field index the entity does not have.
    #[error("field index {index} is out of range for '{entity}'")]
    FieldIndexOutOfRange {
        /// The data entity.
        entity: String,
        /// The offending index.
        index: usize,
    },
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
