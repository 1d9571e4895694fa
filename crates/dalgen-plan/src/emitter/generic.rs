//! A reference emitter producing T-SQL-flavored text.
//!
//! Exists so plans can be rendered and inspected without a real backend;
//! production emitters targeting a specific dialect or source language
//! implement [`Emitter`] themselves.

use crate::ast::{
    CountPlan, DeletePlan, ExistsPlan, Expr, InsertPlan, Literal, ObjectName, PlanSource,
    SelectPlan, UpdatePlan,
};

use super::Emitter;

/// Renders plans as T-SQL-style text: bracket-quoted identifiers, `TOP` as
/// the row cap, `@name` parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericEmitter;

impl GenericEmitter {
    /// Creates the emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn object_name(name: &ObjectName) -> String {
        match &name.schema {
            Some(schema) => format!("[{schema}].[{}]", name.name),
            None => format!("[{}]", name.name),
        }
    }

    fn source(&self, source: &PlanSource) -> String {
        match source {
            PlanSource::Data { name, alias } => {
                let base = Self::object_name(name);
                match alias {
                    Some(alias) => format!("{base} AS [{alias}]"),
                    None => base,
                }
            }
            PlanSource::Subquery { query, alias } => {
                format!("({}) AS [{alias}]", self.emit_select(query))
            }
            PlanSource::Join { left, right, on } => {
                format!(
                    "{} INNER JOIN {} ON {}",
                    self.source(left),
                    self.source(right),
                    self.expr(on)
                )
            }
        }
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => Self::literal(literal),
            Expr::Column { table, name } => match table {
                Some(table) => format!("[{table}].[{name}]"),
                None => format!("[{name}]"),
            },
            Expr::Parameter { name } => format!("@{name}"),
            Expr::Binary { left, op, right } => {
                format!("{} {} {}", self.expr(left), op.as_str(), self.expr(right))
            }
            Expr::Not(inner) => format!("NOT ({})", self.expr(inner)),
            Expr::IsNull { expr, negated } => {
                let spelling = if *negated { "IS NOT NULL" } else { "IS NULL" };
                format!("{} {spelling}", self.expr(expr))
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                let items = list
                    .iter()
                    .map(|e| self.expr(e))
                    .collect::<Vec<_>>()
                    .join(", ");
                let spelling = if *negated { "NOT IN" } else { "IN" };
                format!("{} {spelling} ({items})", self.expr(expr))
            }
            Expr::InSubquery {
                expr,
                query,
                negated,
            } => {
                let spelling = if *negated { "NOT IN" } else { "IN" };
                format!("{} {spelling} ({})", self.expr(expr), self.emit_select(query))
            }
            Expr::Function { name, args } => {
                let rendered = args
                    .iter()
                    .map(|a| self.expr(a))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{name}({rendered})")
            }
        }
    }

    fn literal(literal: &Literal) -> String {
        match literal {
            Literal::Null => String::from("NULL"),
            Literal::Bool(true) => String::from("1"),
            Literal::Bool(false) => String::from("0"),
            Literal::Int(n) => n.to_string(),
            Literal::Float(f) => f.to_string(),
            Literal::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }

    fn where_clause(&self, filter: Option<&Expr>) -> String {
        filter.map_or_else(String::new, |f| format!(" WHERE {}", self.expr(f)))
    }
}

impl Emitter for GenericEmitter {
    fn emit_select(&self, plan: &SelectPlan) -> String {
        let mut sql = String::from("SELECT ");
        if let Some(top) = plan.top {
            sql.push_str(&format!("TOP {top} "));
        }
        let columns = plan
            .columns
            .iter()
            .map(|c| {
                let expr = self.expr(&c.expr);
                match &c.alias {
                    Some(alias) => format!("{expr} AS [{alias}]"),
                    None => expr,
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(&columns);
        sql.push_str(" FROM ");
        sql.push_str(&self.source(&plan.source));
        sql.push_str(&self.where_clause(plan.filter.as_ref()));
        if !plan.order.is_empty() {
            let order = plan
                .order
                .iter()
                .map(|t| format!("{} {}", self.expr(&t.expr), t.direction.as_str()))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(&format!(" ORDER BY {order}"));
        }
        sql
    }

    fn emit_count(&self, plan: &CountPlan) -> String {
        format!(
            "SELECT COUNT(*) FROM {}{}",
            self.source(&plan.source),
            self.where_clause(plan.filter.as_ref())
        )
    }

    fn emit_exists(&self, plan: &ExistsPlan) -> String {
        format!(
            "SELECT CASE WHEN EXISTS (SELECT 1 FROM {}{}) THEN 1 ELSE 0 END",
            self.source(&plan.source),
            self.where_clause(plan.filter.as_ref())
        )
    }

    fn emit_insert(&self, plan: &InsertPlan) -> String {
        let columns = plan
            .columns
            .iter()
            .map(|c| format!("[{c}]"))
            .collect::<Vec<_>>()
            .join(", ");
        let values = plan
            .values
            .iter()
            .map(|v| self.expr(v))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({columns}) VALUES ({values})",
            Self::object_name(&plan.table)
        )
    }

    fn emit_update(&self, plan: &UpdatePlan) -> String {
        let assignments = plan
            .assignments
            .iter()
            .map(|a| format!("[{}] = {}", a.column, self.expr(&a.value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {assignments}{}",
            Self::object_name(&plan.table),
            self.where_clause(plan.filter.as_ref())
        )
    }

    fn emit_delete(&self, plan: &DeletePlan) -> String {
        format!(
            "DELETE FROM {}{}",
            Self::object_name(&plan.table),
            self.where_clause(plan.filter.as_ref())
        )
    }

    fn emit_identity_insert(&self, table: &ObjectName) -> String {
        format!("SET IDENTITY_INSERT {} ON", Self::object_name(table))
    }
}
