//! Pagination planning without a native offset.
//!
//! The plan tree's only cardinality primitive is `top` (first N rows in a
//! given order), so a page deep in the result set is extracted in stages:
//! cap to everything up to and including the page, reverse the order and
//! re-cap to isolate the page as the tail segment, then re-select it in the
//! original direction. Page one degenerates to a single capped select.
//!
//! Planning pages 1..⌈total/size⌉ and concatenating the results reproduces
//! exactly the row sequence of the one unpaginated ordered query.

use tracing::debug;

use dalgen_schema::Table;

use crate::ast::{Expr, OrderTerm, PlanSource, ProjectedColumn, SelectPlan};
use crate::error::{PlanError, Result};
use crate::ops::{projected_columns, table_source};

/// Alias of the stage-A derived table.
const ALL_ROWS_ALIAS: &str = "all_rows";
/// Alias of the stage-B derived table on the join path.
const PAGE_ROWS_ALIAS: &str = "page_rows";

/// A pagination request.
///
/// `total_count` is caller-supplied (typically from a previous count plan)
/// and is not re-derived here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Total rows matching the filter.
    pub total_count: i64,
    /// Rows per page; must be positive.
    pub page_size: i64,
    /// One-based page number.
    pub page_number: i64,
}

/// The outcome of pagination planning.
#[derive(Debug, Clone, PartialEq)]
pub enum PagePlan {
    /// The page lies entirely past the end of the result set; no query is
    /// built.
    Empty,
    /// The query producing exactly the requested page.
    Query(SelectPlan),
}

/// Plans one page of a filtered, ordered selection.
///
/// # Errors
///
/// Precondition violations: non-positive `page_size`, `page_number` below
/// one, an empty order list (pagination is meaningless without a
/// deterministic order), or an empty field list.
pub fn plan_page(
    table: &Table,
    field_indexes: &[usize],
    filter: Option<Expr>,
    order: &[OrderTerm],
    request: PageRequest,
) -> Result<PagePlan> {
    if request.page_size <= 0 {
        return Err(PlanError::precondition(
            "page_size",
            format!("must be positive, got {}", request.page_size),
        ));
    }
    if request.page_number < 1 {
        return Err(PlanError::precondition(
            "page_number",
            format!("must be at least 1, got {}", request.page_number),
        ));
    }
    if order.is_empty() {
        return Err(PlanError::precondition(
            "order",
            "at least one order term is required",
        ));
    }
    let columns = projected_columns(table, field_indexes)?;

    let skipped = request.page_size.saturating_mul(request.page_number - 1);
    if skipped >= request.total_count {
        debug!(
            table = %table.name(),
            page = request.page_number,
            "page starts past the end of the result set"
        );
        return Ok(PagePlan::Empty);
    }

    if request.page_number == 1 {
        debug!(table = %table.name(), "single-stage page plan");
        return Ok(PagePlan::Query(SelectPlan {
            columns,
            source: table_source(table),
            filter,
            order: order.to_vec(),
            top: Some(cap(request.page_size)),
        }));
    }

    let page_rows = cap(request.page_size.min(request.total_count - skipped));
    let key_name: Option<&str> = table
        .single_key_field()
        .and_then(|index| table.field(index))
        .map(|field| field.name().as_str());
    debug!(
        table = %table.name(),
        page = request.page_number,
        keyed = key_name.is_some(),
        "three-stage page plan"
    );

    // Stage A: everything up to and including the requested page, in the
    // caller's order. With a single-column key only the key is carried;
    // order expressions are always projected under ordinal aliases so
    // stage B can re-order the derived table.
    let mut all_columns = match key_name {
        Some(key) => vec![ProjectedColumn::new(Expr::column(key))],
        None => columns.clone(),
    };
    for (position, term) in order.iter().enumerate() {
        all_columns.push(ProjectedColumn::aliased(
            term.expr.clone(),
            ordinal_alias(position),
        ));
    }
    let all_rows = SelectPlan {
        columns: all_columns,
        source: table_source(table),
        filter,
        order: order.to_vec(),
        top: Some(cap(request.page_size.saturating_mul(request.page_number))),
    };

    // Stage B: with every direction reversed, the first `page_rows` rows of
    // stage A are exactly the requested page, read backwards.
    let reversed_order: Vec<OrderTerm> = order
        .iter()
        .enumerate()
        .map(|(position, term)| OrderTerm {
            expr: Expr::column(ordinal_alias(position)),
            direction: term.direction.reversed(),
        })
        .collect();
    let identifying_columns = match key_name {
        Some(key) => vec![ProjectedColumn::new(Expr::column(key))],
        None => (0..order.len())
            .map(|position| ProjectedColumn::new(Expr::column(ordinal_alias(position))))
            .collect(),
    };
    let page_keys = SelectPlan {
        columns: identifying_columns,
        source: PlanSource::subquery(all_rows, ALL_ROWS_ALIAS),
        filter: None,
        order: reversed_order,
        top: Some(page_rows),
    };

    // Stage C: re-select the requested fields for the identified rows, in
    // the original direction.
    let final_plan = match key_name {
        Some(key) => SelectPlan {
            columns,
            source: table_source(table),
            filter: Some(Expr::column(key).in_subquery(page_keys)),
            order: order.to_vec(),
            top: None,
        },
        None => {
            let mut conditions = order.iter().enumerate().map(|(position, term)| {
                term.expr.clone().eq(Expr::qualified_column(
                    PAGE_ROWS_ALIAS,
                    ordinal_alias(position),
                ))
            });
            // The order list is non-empty, so there is a first condition.
            let first = conditions.next().ok_or_else(|| {
                PlanError::precondition("order", "at least one order term is required")
            })?;
            let on = conditions.fold(first, Expr::and);
            SelectPlan {
                columns,
                source: table_source(table)
                    .join(PlanSource::subquery(page_keys, PAGE_ROWS_ALIAS), on),
                filter: None,
                order: order.to_vec(),
                top: None,
            }
        }
    };
    Ok(PagePlan::Query(final_plan))
}

fn ordinal_alias(position: usize) -> String {
    format!("ord_{position}")
}

#[allow(clippy::cast_sign_loss)]
const fn cap(rows: i64) -> u64 {
    // Callers validate positivity before calling.
    rows as u64
}
