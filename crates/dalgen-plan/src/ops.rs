//! Basic operation planners.
//!
//! Thin constructors for the plans a data-access layer issues constantly:
//! select, count, exists, single-row insert, update, delete. The staged
//! planners in [`crate::page`], [`crate::cascade`], and [`crate::batch`]
//! build on these.

use dalgen_schema::{FieldMask, Table, TableField};

use crate::ast::{
    Assignment, CountPlan, DeletePlan, ExistsPlan, Expr, InsertPlan, ObjectName, OrderTerm,
    PlanSource, ProjectedColumn, SelectPlan, UpdatePlan,
};
use crate::batch::{ParamNamer, ParamSequence};
use crate::error::{PlanError, Result};

/// Returns a plan source for the table.
#[must_use]
pub fn table_source(table: &Table) -> PlanSource {
    PlanSource::data(ObjectName::from(table.name()))
}

/// Plans a filtered, ordered selection of the given fields.
///
/// # Errors
///
/// Fails when `field_indexes` is empty or names a field the table does not
/// have.
pub fn plan_select(
    table: &Table,
    field_indexes: &[usize],
    filter: Option<Expr>,
    order: Vec<OrderTerm>,
) -> Result<SelectPlan> {
    Ok(SelectPlan {
        columns: projected_columns(table, field_indexes)?,
        source: table_source(table),
        filter,
        order,
        top: None,
    })
}

/// Plans a selection of the fields named by a bitmask.
///
/// # Errors
///
/// Fails when the table is past the bitmask field ceiling, when the mask
/// addresses a missing field, or when it decodes to the empty selection.
pub fn plan_select_masked(
    table: &Table,
    mask: FieldMask,
    filter: Option<Expr>,
    order: Vec<OrderTerm>,
) -> Result<SelectPlan> {
    let field_indexes = mask.decode(table)?;
    plan_select(table, &field_indexes, filter, order)
}

/// Plans a row count.
#[must_use]
pub fn plan_count(table: &Table, filter: Option<Expr>) -> CountPlan {
    CountPlan {
        source: table_source(table),
        filter,
    }
}

/// Plans an existence check.
#[must_use]
pub fn plan_exists(table: &Table, filter: Option<Expr>) -> ExistsPlan {
    ExistsPlan {
        source: table_source(table),
        filter,
    }
}

/// Plans a single-row insert over the table's insertable fields, binding
/// each value to a parameter named by `namer`.
///
/// Identity and read-only fields are skipped; to insert explicit identity
/// values, batch the plan with an identity prefix via
/// [`crate::batch::plan_insert_batches`].
///
/// # Errors
///
/// Fails when the table has no insertable fields.
pub fn plan_insert(
    table: &Table,
    namer: &ParamNamer,
    sequence: &mut ParamSequence,
) -> Result<InsertPlan> {
    let insertable: Vec<&TableField> = table
        .fields()
        .iter()
        .filter(|f| f.is_insertable())
        .collect();
    if insertable.is_empty() {
        return Err(PlanError::precondition(
            "table",
            format!("'{}' has no insertable fields", table.name()),
        ));
    }

    let mut columns = Vec::with_capacity(insertable.len());
    let mut values = Vec::with_capacity(insertable.len());
    for field in insertable {
        columns.push(field.name().as_str().to_string());
        values.push(Expr::parameter(namer.name(field.name().as_str(), sequence)));
    }
    Ok(InsertPlan {
        table: ObjectName::from(table.name()),
        columns,
        values,
    })
}

/// Plans an update of the given fields, binding each value to a parameter
/// named by `namer`.
///
/// # Errors
///
/// Fails when `field_indexes` is empty, names a missing field, or names a
/// field that cannot be written.
pub fn plan_update(
    table: &Table,
    field_indexes: &[usize],
    filter: Option<Expr>,
    namer: &ParamNamer,
    sequence: &mut ParamSequence,
) -> Result<UpdatePlan> {
    if field_indexes.is_empty() {
        return Err(PlanError::precondition("fields", "at least one field is required"));
    }
    let mut assignments = Vec::with_capacity(field_indexes.len());
    for &index in field_indexes {
        let field = resolve_field(table, index)?;
        if !field.is_insertable() {
            return Err(PlanError::precondition(
                "fields",
                format!("'{}' is not writable", field.name()),
            ));
        }
        assignments.push(Assignment {
            column: field.name().as_str().to_string(),
            value: Expr::parameter(namer.name(field.name().as_str(), sequence)),
        });
    }
    Ok(UpdatePlan {
        table: ObjectName::from(table.name()),
        assignments,
        filter,
    })
}

/// Plans a filtered delete.
#[must_use]
pub fn plan_delete(table: &Table, filter: Option<Expr>) -> DeletePlan {
    DeletePlan {
        table: ObjectName::from(table.name()),
        filter,
    }
}

/// Projects the named fields as plain column references.
pub(crate) fn projected_columns(
    table: &Table,
    field_indexes: &[usize],
) -> Result<Vec<ProjectedColumn>> {
    if field_indexes.is_empty() {
        return Err(PlanError::precondition("fields", "at least one field is required"));
    }
    field_indexes
        .iter()
        .map(|&index| {
            let field = resolve_field(table, index)?;
            Ok(ProjectedColumn::new(Expr::column(field.name().as_str())))
        })
        .collect()
}

fn resolve_field(table: &Table, index: usize) -> Result<&TableField> {
    table.field(index).ok_or_else(|| {
        PlanError::precondition(
            "fields",
            format!("field index {index} is out of range for '{}'", table.name()),
        )
    })
}
