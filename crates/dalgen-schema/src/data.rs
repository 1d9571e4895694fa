//! Data entities: tables, views, and their fields.
//!
//! Entities live in per-database arenas and are addressed by index-based
//! ids. A field's identity is the pair of its owning entity and its
//! zero-based index; indexes are contiguous in declaration order.

use serde::{Deserialize, Serialize};

use crate::constraint::Constraint;
use crate::ident::{Ident, QualifiedName};
use crate::types::ValueType;

/// Arena id of a table within its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub usize);

/// Arena id of a view within its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub usize);

/// Identity of a table field: owning table plus declaration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId {
    /// Owning table.
    pub table: TableId,
    /// Zero-based field index on that table.
    pub index: usize,
}

/// Common surface of tables and views.
pub trait DataEntity {
    /// Returns the qualified object name.
    fn qualified_name(&self) -> &QualifiedName;

    /// Returns the number of fields.
    fn field_count(&self) -> usize;

    /// Returns the name of the field at `index`.
    fn field_name(&self, index: usize) -> Option<&Ident>;
}

/// A field of a table.
#[derive(Debug, Clone)]
pub struct TableField {
    pub(crate) id: FieldId,
    pub(crate) name: Ident,
    pub(crate) value_type: ValueType,
    pub(crate) native_type: String,
    pub(crate) max_length: Option<u32>,
    pub(crate) nullable: bool,
    pub(crate) identity: bool,
    pub(crate) read_only: bool,
    pub(crate) has_default: bool,
    pub(crate) references: Option<FieldId>,
    pub(crate) constraints: Vec<usize>,
}

impl TableField {
    /// Returns the field identity.
    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.name
    }

    /// Returns the zero-based declaration index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.id.index
    }

    /// Returns the portable type code.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the dialect-specific type name.
    #[must_use]
    pub fn native_type(&self) -> &str {
        &self.native_type
    }

    /// Returns the maximum length for sized types.
    #[must_use]
    pub const fn max_length(&self) -> Option<u32> {
        self.max_length
    }

    /// Returns whether the field accepts NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns whether the field is an identity column.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.identity
    }

    /// Returns whether the field is read-only (computed, rowversion, ...).
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns whether the field has a server-side default.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.has_default
    }

    /// Returns whether values must be supplied on insert.
    ///
    /// Identity and read-only fields are generated by the server.
    #[must_use]
    pub const fn is_insertable(&self) -> bool {
        !self.identity && !self.read_only
    }

    /// Returns the field this foreign-key column references, if any.
    #[must_use]
    pub const fn references(&self) -> Option<FieldId> {
        self.references
    }

    /// Returns the positions (on the owning table) of the constraints this
    /// field participates in.
    #[must_use]
    pub fn constraint_positions(&self) -> &[usize] {
        &self.constraints
    }
}

/// A field of a view.
#[derive(Debug, Clone)]
pub struct ViewField {
    pub(crate) index: usize,
    pub(crate) name: Ident,
    pub(crate) value_type: ValueType,
    pub(crate) native_type: String,
    pub(crate) max_length: Option<u32>,
    pub(crate) nullable: bool,
}

impl ViewField {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.name
    }

    /// Returns the zero-based declaration index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the portable type code.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the dialect-specific type name.
    #[must_use]
    pub fn native_type(&self) -> &str {
        &self.native_type
    }

    /// Returns the maximum length for sized types.
    #[must_use]
    pub const fn max_length(&self) -> Option<u32> {
        self.max_length
    }

    /// Returns whether the field accepts NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// A table, with its ordered fields and constraints.
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) id: TableId,
    pub(crate) name: QualifiedName,
    pub(crate) fields: Vec<TableField>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) primary_key: Option<usize>,
}

impl Table {
    /// Returns the arena id.
    #[must_use]
    pub const fn id(&self) -> TableId {
        self.id
    }

    /// Returns the qualified table name.
    #[must_use]
    pub const fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Returns the ordered fields.
    #[must_use]
    pub fn fields(&self) -> &[TableField] {
        &self.fields
    }

    /// Returns the field at `index`.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&TableField> {
        self.fields.get(index)
    }

    /// Returns the field with the given name (case-insensitive).
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&TableField> {
        self.fields.iter().find(|f| f.name == *name)
    }

    /// Returns all constraints.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns the primary-key constraint, if the table has one.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Constraint> {
        self.primary_key.map(|i| &self.constraints[i])
    }

    /// Returns the single primary-key field index, when the primary key
    /// covers exactly one column.
    #[must_use]
    pub fn single_key_field(&self) -> Option<usize> {
        match self.primary_key() {
            Some(pk) if pk.fields().len() == 1 => Some(pk.fields()[0]),
            _ => None,
        }
    }
}

impl DataEntity for Table {
    fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field_name(&self, index: usize) -> Option<&Ident> {
        self.fields.get(index).map(TableField::name)
    }
}

/// A view, with its ordered fields.
#[derive(Debug, Clone)]
pub struct View {
    pub(crate) id: ViewId,
    pub(crate) name: QualifiedName,
    pub(crate) fields: Vec<ViewField>,
}

impl View {
    /// Returns the arena id.
    #[must_use]
    pub const fn id(&self) -> ViewId {
        self.id
    }

    /// Returns the qualified view name.
    #[must_use]
    pub const fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Returns the ordered fields.
    #[must_use]
    pub fn fields(&self) -> &[ViewField] {
        &self.fields
    }

    /// Returns the field with the given name (case-insensitive).
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&ViewField> {
        self.fields.iter().find(|f| f.name == *name)
    }
}

impl DataEntity for View {
    fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field_name(&self, index: usize) -> Option<&Ident> {
        self.fields.get(index).map(|f| &f.name)
    }
}
