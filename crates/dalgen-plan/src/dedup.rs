//! Constraint deduplication for accessor generation.
//!
//! Several constraints can cover the same ordered field sequence (a unique
//! key shadowing the primary key, a foreign key doubling a unique key).
//! Generating one accessor per constraint would then produce colliding
//! signatures, so a per-run tracker decides which constraints surface.

use dalgen_schema::{Constraint, FieldId};

/// Returns whether two constraints cover the same ordered field sequence.
///
/// False when either field list is empty or the lengths differ; otherwise
/// field identities are compared position by position. The relation is
/// symmetric.
#[must_use]
pub fn has_same_fields(a: &Constraint, b: &Constraint) -> bool {
    if a.fields().is_empty() || b.fields().is_empty() {
        return false;
    }
    if a.fields().len() != b.fields().len() {
        return false;
    }
    a.field_ids().eq(b.field_ids())
}

/// Tracks constraint field sequences over one generation run.
///
/// Scoped to a single run and never shared; create a fresh tracker per
/// table or per generation pass.
#[derive(Debug, Default)]
pub struct ConstraintTracker {
    seen: Vec<Vec<FieldId>>,
}

impl ConstraintTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { seen: Vec::new() }
    }

    /// Decides whether an accessor should be generated for the constraint.
    ///
    /// Primary keys always surface. Unique and foreign keys surface only
    /// when no previously checked constraint covered the same field
    /// sequence. Every checked constraint is recorded either way, so later
    /// duplicates are suppressed regardless of which kind came first.
    pub fn should_surface(&mut self, constraint: &Constraint) -> bool {
        let fields: Vec<FieldId> = constraint.field_ids().collect();
        let duplicate = !fields.is_empty()
            && self.seen.iter().any(|prior| *prior == fields);
        self.seen.push(fields);
        constraint.is_primary_key() || !duplicate
    }
}
