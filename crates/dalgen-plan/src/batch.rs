//! Batched multi-row insertion and parameter naming.
//!
//! N row-insert plans are split into statement-count-bounded batches. When
//! the target table needs identity insertion enabled, that prefix statement
//! runs exactly once, at the head of the first batch, and consumes one slot
//! of that batch's capacity.

use std::num::NonZeroUsize;

use tracing::debug;

use crate::ast::{InsertPlan, ObjectName, PlanStatement, StatementBatch};
use crate::config::PlanConfig;

/// Monotonic counter feeding uniquified parameter names.
///
/// This is a plain value, not shared state: each multi-row statement
/// construction owns (or mutably borrows) one. Nothing coordinates
/// sequences across concurrent planners — two planners given the same
/// starting point will produce colliding names, and that is the documented
/// trade-off, not a bug. Wraps to zero at `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamSequence {
    next: u32,
}

impl ParamSequence {
    /// Creates a sequence starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Creates a sequence starting at the given value.
    #[must_use]
    pub const fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Returns the current value and advances, wrapping at the maximum.
    pub fn next_value(&mut self) -> u32 {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        value
    }
}

/// How bind parameters are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamNaming {
    /// Name derived from the field alone. Safe only when the statement is
    /// issued once.
    Stable,
    /// Field name suffixed with a sequence value, so several rows' values
    /// can share one statement without collisions.
    Unique,
}

/// Produces parameter names for a field under the chosen naming mode.
#[derive(Debug, Clone, Copy)]
pub struct ParamNamer {
    naming: ParamNaming,
}

impl ParamNamer {
    /// Creates a namer with the given mode.
    #[must_use]
    pub const fn new(naming: ParamNaming) -> Self {
        Self { naming }
    }

    /// Creates a namer from the configuration.
    ///
    /// `use_stable_parameter_names` selects stable mode; batching code
    /// overrides this to unique mode whenever rows are combined.
    #[must_use]
    pub const fn from_config(config: &PlanConfig) -> Self {
        if config.use_stable_parameter_names {
            Self::new(ParamNaming::Stable)
        } else {
            Self::new(ParamNaming::Unique)
        }
    }

    /// Returns the parameter name for a field, consuming a sequence value
    /// in unique mode.
    #[must_use]
    pub fn name(&self, field: &str, sequence: &mut ParamSequence) -> String {
        match self.naming {
            ParamNaming::Stable => field.to_string(),
            ParamNaming::Unique => format!("{field}{}", sequence.next_value()),
        }
    }
}

/// Splits row-insert plans into executable batches.
///
/// `limit` bounds statements per batch (`None` = unlimited). When
/// `identity_table` is set, the enable-identity prefix opens the first
/// batch and counts against its capacity; row order is preserved across
/// batches.
#[must_use]
pub fn plan_insert_batches(
    rows: Vec<InsertPlan>,
    identity_table: Option<ObjectName>,
    limit: Option<NonZeroUsize>,
) -> Vec<StatementBatch> {
    let row_count = rows.len();
    let prefix = identity_table.map(PlanStatement::EnableIdentityInsert);

    let mut batches = Vec::new();
    let mut current = StatementBatch::default();
    if let Some(prefix) = prefix {
        current.statements.push(prefix);
    }

    for row in rows {
        if limit.is_some_and(|l| current.len() == l.get()) {
            batches.push(std::mem::take(&mut current));
        }
        current.statements.push(PlanStatement::Insert(row));
    }
    if !current.is_empty() {
        batches.push(current);
    }

    debug!(rows = row_count, batches = batches.len(), "planned insert batches");
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    fn row(n: usize) -> InsertPlan {
        InsertPlan {
            table: ObjectName::new("items"),
            columns: vec![String::from("value")],
            values: vec![Expr::int(i64::try_from(n).unwrap())],
        }
    }

    fn rows(count: usize) -> Vec<InsertPlan> {
        (0..count).map(row).collect()
    }

    fn insert_count(batch: &StatementBatch) -> usize {
        batch
            .statements
            .iter()
            .filter(|s| matches!(s, PlanStatement::Insert(_)))
            .count()
    }

    #[test]
    fn test_unlimited_without_prefix_is_one_batch() {
        let batches = plan_insert_batches(rows(7), None, None);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 7);
    }

    #[test]
    fn test_limit_splits_in_row_order() {
        let batches = plan_insert_batches(rows(25), None, NonZeroUsize::new(10));
        assert_eq!(
            batches.iter().map(StatementBatch::len).collect::<Vec<_>>(),
            vec![10, 10, 5]
        );
        // First statement of the second batch is row 10.
        assert_eq!(batches[1].statements[0], PlanStatement::Insert(row(10)));
    }

    #[test]
    fn test_prefix_consumes_first_batch_slot() {
        let batches =
            plan_insert_batches(rows(250), Some(ObjectName::new("items")), NonZeroUsize::new(100));
        assert_eq!(batches.len(), 3);
        assert_eq!(
            batches.iter().map(insert_count).collect::<Vec<_>>(),
            vec![99, 100, 51]
        );
        assert!(matches!(
            batches[0].statements[0],
            PlanStatement::EnableIdentityInsert(_)
        ));
        // 250 inserts + 1 prefix = 251 statements overall.
        assert_eq!(batches.iter().map(StatementBatch::len).sum::<usize>(), 251);
    }

    #[test]
    fn test_prefix_only_once_even_unlimited() {
        let batches = plan_insert_batches(rows(3), Some(ObjectName::new("items")), None);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 4);
        assert!(matches!(
            batches[0].statements[0],
            PlanStatement::EnableIdentityInsert(_)
        ));
    }

    #[test]
    fn test_limit_of_one_with_prefix() {
        let batches =
            plan_insert_batches(rows(2), Some(ObjectName::new("items")), NonZeroUsize::new(1));
        assert_eq!(
            batches.iter().map(StatementBatch::len).collect::<Vec<_>>(),
            vec![1, 1, 1]
        );
        assert!(matches!(
            batches[0].statements[0],
            PlanStatement::EnableIdentityInsert(_)
        ));
    }

    #[test]
    fn test_no_rows_no_batches() {
        assert!(plan_insert_batches(Vec::new(), None, NonZeroUsize::new(10)).is_empty());
    }

    #[test]
    fn test_stable_names_ignore_sequence() {
        let namer = ParamNamer::new(ParamNaming::Stable);
        let mut seq = ParamSequence::new();
        assert_eq!(namer.name("title", &mut seq), "title");
        assert_eq!(namer.name("title", &mut seq), "title");
        assert_eq!(seq, ParamSequence::new());
    }

    #[test]
    fn test_unique_names_advance_sequence() {
        let namer = ParamNamer::new(ParamNaming::Unique);
        let mut seq = ParamSequence::new();
        assert_eq!(namer.name("title", &mut seq), "title0");
        assert_eq!(namer.name("title", &mut seq), "title1");
        assert_eq!(namer.name("body", &mut seq), "body2");
    }

    #[test]
    fn test_sequence_wraps_at_max() {
        let mut seq = ParamSequence::starting_at(u32::MAX);
        assert_eq!(seq.next_value(), u32::MAX);
        assert_eq!(seq.next_value(), 0);
    }
}
