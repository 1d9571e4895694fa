//! # dalgen-plan
//!
//! Operation planning over a [`dalgen_schema`] catalog: an abstract
//! statement/expression tree, thin constructors for the everyday operations
//! (select, count, exists, insert, update, delete), and the staged planners
//! a data-access layer needs when the target offers no native offset or
//! multi-row cascade — pagination, cascading deletion, and batched
//! insertion.
//!
//! Plans carry no dialect text. Rendering belongs to [`Emitter`]
//! implementations; [`GenericEmitter`] is the reference rendering used
//! throughout the tests.
//!
//! ```rust
//! use dalgen_plan::{plan_select, Emitter, Expr, GenericEmitter};
//! use dalgen_schema::{ColumnDef, Database, DatabaseDef, TableDef, ValueType};
//!
//! let db = Database::from_def(&DatabaseDef {
//!     name: "shop".into(),
//!     tables: vec![TableDef {
//!         name: "customers".into(),
//!         schema: None,
//!         columns: vec![
//!             ColumnDef::new("id", ValueType::Int64).identity(),
//!             ColumnDef::new("name", ValueType::Text),
//!         ],
//!         constraints: vec![],
//!     }],
//!     views: vec![],
//! })
//! .unwrap();
//!
//! let table = db.table_by_name("customers").unwrap();
//! let filter = Expr::column("id").eq(Expr::int(7));
//! let plan = plan_select(table, &[0, 1], Some(filter), vec![]).unwrap();
//! assert_eq!(
//!     GenericEmitter::new().emit_select(&plan),
//!     "SELECT [id], [name] FROM [customers] WHERE [id] = 7"
//! );
//! ```

pub mod ast;
pub mod batch;
pub mod cascade;
pub mod config;
pub mod conn;
pub mod dedup;
pub mod emitter;
pub mod error;
pub mod ops;
pub mod page;

pub use ast::{
    Assignment, BinaryOp, CountPlan, DeletePlan, Direction, ExistsPlan, Expr, InsertPlan, Literal,
    ObjectName, OrderTerm, PlanSource, PlanStatement, ProjectedColumn, SelectPlan, StatementBatch,
    UpdatePlan,
};
pub use batch::{plan_insert_batches, ParamNamer, ParamNaming, ParamSequence};
pub use cascade::plan_cascade_delete;
pub use config::PlanConfig;
pub use conn::{ConnectionCandidates, ConnectionStrategy, ReadPreferred, WritePreferred};
pub use dedup::{has_same_fields, ConstraintTracker};
pub use emitter::{Emitter, GenericEmitter};
pub use error::{PlanError, Result};
pub use ops::{
    plan_count, plan_delete, plan_exists, plan_insert, plan_select, plan_select_masked,
    plan_update, table_source,
};
pub use page::{plan_page, PagePlan, PageRequest};
