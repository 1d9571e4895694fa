//! The emitter contract.
//!
//! Everything dialect-specific — how identifiers are quoted, how a row cap
//! or an existence check is spelled, what a parameter marker looks like —
//! lives behind this trait. The planning core only ever produces the
//! abstract tree in [`crate::ast`].

mod generic;

pub use generic::GenericEmitter;

use crate::ast::{
    CountPlan, DeletePlan, ExistsPlan, InsertPlan, ObjectName, PlanStatement, SelectPlan,
    StatementBatch, UpdatePlan,
};

/// Renders abstract plans into target text.
pub trait Emitter {
    /// Renders a select plan.
    fn emit_select(&self, plan: &SelectPlan) -> String;

    /// Renders a count plan.
    fn emit_count(&self, plan: &CountPlan) -> String;

    /// Renders an existence-check plan.
    fn emit_exists(&self, plan: &ExistsPlan) -> String;

    /// Renders a single-row insert plan.
    fn emit_insert(&self, plan: &InsertPlan) -> String;

    /// Renders an update plan.
    fn emit_update(&self, plan: &UpdatePlan) -> String;

    /// Renders a delete plan.
    fn emit_delete(&self, plan: &DeletePlan) -> String;

    /// Renders the one-time identity-insertion prefix for a table.
    fn emit_identity_insert(&self, table: &ObjectName) -> String;

    /// Renders any plan statement.
    fn emit_statement(&self, statement: &PlanStatement) -> String {
        match statement {
            PlanStatement::Select(plan) => self.emit_select(plan),
            PlanStatement::Count(plan) => self.emit_count(plan),
            PlanStatement::Exists(plan) => self.emit_exists(plan),
            PlanStatement::Insert(plan) => self.emit_insert(plan),
            PlanStatement::Update(plan) => self.emit_update(plan),
            PlanStatement::Delete(plan) => self.emit_delete(plan),
            PlanStatement::EnableIdentityInsert(table) => self.emit_identity_insert(table),
        }
    }

    /// Renders a batch as statements joined by the statement separator.
    fn emit_batch(&self, batch: &StatementBatch) -> String {
        batch
            .statements
            .iter()
            .map(|s| self.emit_statement(s))
            .collect::<Vec<_>>()
            .join(";\n")
    }
}
