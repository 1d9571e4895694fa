//! Table constraints: primary keys, unique keys, and foreign keys.

use serde::{Deserialize, Serialize};

use crate::data::{FieldId, TableId};
use crate::ident::Ident;

/// The kind of a table constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Primary key.
    PrimaryKey,
    /// Unique key.
    UniqueKey,
    /// Foreign key.
    ForeignKey,
}

impl ConstraintKind {
    /// Returns whether constraints of this kind enforce uniqueness.
    ///
    /// True exactly for primary and unique keys.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        matches!(self, Self::PrimaryKey | Self::UniqueKey)
    }
}

/// A finalized constraint on one table.
///
/// The field sequence is ordered and never empty; order drives both
/// accessor naming and duplicate detection downstream. A foreign key always
/// resolves its referenced table; other kinds carry none.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    name: Ident,
    kind: ConstraintKind,
    table: TableId,
    fields: Vec<usize>,
    references: Option<TableId>,
}

impl Constraint {
    /// Creates a constraint.
    ///
    /// The catalog loader validates the field list and reference target
    /// before calling this; direct construction is available for tests and
    /// programmatic schema assembly.
    #[must_use]
    pub fn new(
        name: impl Into<Ident>,
        kind: ConstraintKind,
        table: TableId,
        fields: Vec<usize>,
        references: Option<TableId>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            table,
            fields,
            references,
        }
    }

    /// Returns the constraint name.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.name
    }

    /// Returns the constraint kind.
    #[must_use]
    pub const fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Returns the owning table.
    #[must_use]
    pub const fn table(&self) -> TableId {
        self.table
    }

    /// Returns the ordered field indexes on the owning table.
    #[must_use]
    pub fn fields(&self) -> &[usize] {
        &self.fields
    }

    /// Returns the ordered field identities of the constrained fields.
    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        let table = self.table;
        self.fields.iter().map(move |&index| FieldId { table, index })
    }

    /// Returns the referenced table for foreign keys.
    #[must_use]
    pub const fn references(&self) -> Option<TableId> {
        self.references
    }

    /// Returns whether this constraint enforces uniqueness.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.kind.is_unique()
    }

    /// Returns whether this is the primary-key constraint.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self.kind, ConstraintKind::PrimaryKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_uniqueness() {
        assert!(ConstraintKind::PrimaryKey.is_unique());
        assert!(ConstraintKind::UniqueKey.is_unique());
        assert!(!ConstraintKind::ForeignKey.is_unique());
    }

    #[test]
    fn test_field_ids_preserve_order() {
        let constraint = Constraint::new(
            "uk_name_email",
            ConstraintKind::UniqueKey,
            TableId(3),
            vec![2, 0],
            None,
        );
        let ids: Vec<_> = constraint.field_ids().collect();
        assert_eq!(
            ids,
            vec![
                FieldId {
                    table: TableId(3),
                    index: 2
                },
                FieldId {
                    table: TableId(3),
                    index: 0
                },
            ]
        );
    }
}
