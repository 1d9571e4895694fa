//! The abstract plan tree consumed by emitters.
//!
//! Plans carry no dialect text; how an expression or statement is spelled
//! belongs entirely to the [`Emitter`](crate::emitter::Emitter).

mod expr;
mod statement;

pub use expr::{BinaryOp, Expr, Literal};
pub use statement::{
    Assignment, CountPlan, DeletePlan, Direction, ExistsPlan, InsertPlan, ObjectName, OrderTerm,
    PlanSource, PlanStatement, ProjectedColumn, SelectPlan, StatementBatch, UpdatePlan,
};
