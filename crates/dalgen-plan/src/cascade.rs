//! Dependency-ordered cascading deletion.
//!
//! A breadth-first traversal over the reverse foreign-key index produces
//! one delete plan per affected table, ordered so dependents are deleted
//! before the rows they reference. Each traversal level scopes the next
//! through a *region*: the sub-selection of key values being deleted at
//! that level.

use std::collections::VecDeque;

use tracing::debug;

use dalgen_schema::{Database, FieldId, TableId};

use crate::ast::{DeletePlan, Expr, ObjectName, ProjectedColumn, SelectPlan};
use crate::error::{PlanError, Result};
use crate::ops::table_source;

/// One pending traversal level: a referenced field, the condition scoping
/// its rows, and the chain of tables that led here (for cycle detection).
struct Level {
    field: FieldId,
    condition: Option<Expr>,
    chain: Vec<TableId>,
}

/// Plans the deletion of the filtered rows of `table` together with every
/// row that transitively references them.
///
/// The returned plans are in valid execution order for an acyclic
/// reference graph: deepest dependents first, the target table last.
///
/// # Errors
///
/// Returns [`PlanError::CyclicReference`] when the foreign-key graph loops
/// back onto a table already on the current traversal chain (including
/// self-referencing tables). Diamond-shaped graphs are fine; only true
/// cycles are rejected.
pub fn plan_cascade_delete(
    database: &Database,
    table: TableId,
    filter: Option<Expr>,
) -> Result<Vec<DeletePlan>> {
    let target = database.table(table);
    let mut queue: VecDeque<Level> = VecDeque::new();
    for field in target.fields() {
        if !database.referencing_fields(field.id()).is_empty() {
            queue.push_back(Level {
                field: field.id(),
                condition: filter.clone(),
                chain: vec![table],
            });
        }
    }

    let mut plans: Vec<DeletePlan> = Vec::new();
    while let Some(level) = queue.pop_front() {
        let owner = database.table(level.field.table);
        let column = owner.fields()[level.field.index].name().as_str();

        // The live set of key values targeted for deletion at this level.
        let region = SelectPlan {
            columns: vec![ProjectedColumn::new(Expr::column(column))],
            source: table_source(owner),
            filter: level.condition.clone(),
            order: vec![],
            top: None,
        };

        for &referencing in database.referencing_fields(level.field) {
            let dependent = database.table(referencing.table);
            if level.chain.contains(&referencing.table) {
                return Err(PlanError::CyclicReference {
                    table: dependent.name().to_string(),
                });
            }
            let dependent_column = dependent.fields()[referencing.index].name().as_str();
            let condition = Expr::column(dependent_column).in_subquery(region.clone());
            debug!(
                table = %dependent.name(),
                via = dependent_column,
                "cascade reaches dependent table"
            );
            plans.push(DeletePlan {
                table: ObjectName::from(dependent.name()),
                filter: Some(condition.clone()),
            });

            let mut chain = level.chain.clone();
            chain.push(referencing.table);
            for field in dependent.fields() {
                if !database.referencing_fields(field.id()).is_empty() {
                    queue.push_back(Level {
                        field: field.id(),
                        condition: Some(condition.clone()),
                        chain: chain.clone(),
                    });
                }
            }
        }
    }

    // Discovery order is shallowest-first; execution needs deepest-first,
    // with the target itself closing the sequence.
    plans.reverse();
    plans.push(DeletePlan {
        table: ObjectName::from(target.name()),
        filter,
    });
    debug!(table = %target.name(), plans = plans.len(), "planned cascade delete");
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dalgen_schema::{
        ColumnDef, ConstraintDef, ConstraintKindDef, DatabaseDef, ForeignRefDef, TableDef,
        ValueType,
    };

    fn pk() -> ConstraintDef {
        ConstraintDef {
            name: String::from("pk"),
            kind: ConstraintKindDef::PrimaryKey,
            columns: vec![String::from("id")],
            references: None,
        }
    }

    fn fk(column: &str, target: &str) -> ConstraintDef {
        ConstraintDef {
            name: format!("fk_{column}"),
            kind: ConstraintKindDef::ForeignKey,
            columns: vec![column.to_string()],
            references: Some(ForeignRefDef {
                table: target.to_string(),
                columns: vec![String::from("id")],
            }),
        }
    }

    fn table(name: &str, extra: &[(&str, Option<&str>)]) -> TableDef {
        let mut columns = vec![ColumnDef::new("id", ValueType::Int64).identity()];
        let mut constraints = vec![pk()];
        for (column, target) in extra {
            columns.push(ColumnDef::new(*column, ValueType::Int64));
            if let Some(target) = target {
                constraints.push(fk(column, target));
            }
        }
        TableDef {
            name: name.to_string(),
            schema: None,
            columns,
            constraints,
        }
    }

    fn chain_db() -> Database {
        Database::from_def(&DatabaseDef {
            name: String::from("shop"),
            tables: vec![
                table("customers", &[]),
                table("orders", &[("customer_id", Some("customers"))]),
                table("order_items", &[("order_id", Some("orders"))]),
            ],
            views: vec![],
        })
        .unwrap()
    }

    fn plan_tables(plans: &[DeletePlan]) -> Vec<&str> {
        plans.iter().map(|p| p.table.name.as_str()).collect()
    }

    #[test]
    fn test_chain_deletes_dependents_first() {
        let db = chain_db();
        let customers = db.table_by_name("customers").unwrap().id();
        let filter = Expr::column("id").eq(Expr::int(5));
        let plans = plan_cascade_delete(&db, customers, Some(filter)).unwrap();
        assert_eq!(plan_tables(&plans), vec!["order_items", "orders", "customers"]);
    }

    #[test]
    fn test_leaf_table_has_single_plan() {
        let db = chain_db();
        let items = db.table_by_name("order_items").unwrap().id();
        let plans = plan_cascade_delete(&db, items, None).unwrap();
        assert_eq!(plan_tables(&plans), vec!["order_items"]);
        assert!(plans[0].filter.is_none());
    }

    #[test]
    fn test_dependent_conditions_are_scoped_regions() {
        let db = chain_db();
        let customers = db.table_by_name("customers").unwrap().id();
        let filter = Expr::column("id").eq(Expr::int(5));
        let plans = plan_cascade_delete(&db, customers, Some(filter)).unwrap();

        // The orders plan keys on customer_id IN (select id from customers ...).
        let orders = &plans[1];
        let Some(Expr::InSubquery { expr, query, .. }) = &orders.filter else {
            panic!("expected an IN-subquery condition");
        };
        assert_eq!(**expr, Expr::column("customer_id"));
        assert_eq!(query.columns, vec![ProjectedColumn::new(Expr::column("id"))]);
        assert!(query.filter.is_some());
    }

    #[test]
    fn test_diamond_graph_is_not_a_cycle() {
        // refunds -> payments -> accounts and refunds -> accounts directly.
        let db = Database::from_def(&DatabaseDef {
            name: String::from("billing"),
            tables: vec![
                table("accounts", &[]),
                table("payments", &[("account_id", Some("accounts"))]),
                table(
                    "refunds",
                    &[
                        ("payment_id", Some("payments")),
                        ("account_id", Some("accounts")),
                    ],
                ),
            ],
            views: vec![],
        })
        .unwrap();
        let accounts = db.table_by_name("accounts").unwrap().id();
        let plans = plan_cascade_delete(&db, accounts, None).unwrap();
        let tables = plan_tables(&plans);
        assert_eq!(*tables.last().unwrap(), "accounts");
        // Refunds is reached both directly and through payments.
        assert_eq!(tables.iter().filter(|t| **t == "refunds").count(), 2);
        assert!(
            tables.iter().position(|t| *t == "refunds").unwrap()
                < tables.iter().position(|t| *t == "payments").unwrap()
        );
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let db = Database::from_def(&DatabaseDef {
            name: String::from("hr"),
            tables: vec![table("employees", &[("manager_id", Some("employees"))])],
            views: vec![],
        })
        .unwrap();
        let employees = db.table_by_name("employees").unwrap().id();
        assert!(matches!(
            plan_cascade_delete(&db, employees, None),
            Err(PlanError::CyclicReference { table }) if table == "employees"
        ));
    }

    #[test]
    fn test_two_table_cycle_is_rejected() {
        let db = Database::from_def(&DatabaseDef {
            name: String::from("cyclic"),
            tables: vec![
                table("a", &[("b_id", Some("b"))]),
                table("b", &[("a_id", Some("a"))]),
            ],
            views: vec![],
        })
        .unwrap();
        let a = db.table_by_name("a").unwrap().id();
        assert!(matches!(
            plan_cascade_delete(&db, a, None),
            Err(PlanError::CyclicReference { .. })
        ));
    }
}
