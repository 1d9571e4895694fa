//! Statement nodes of the plan tree.

use dalgen_schema::QualifiedName;

use super::expr::Expr;

/// Order direction for an order term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl Direction {
    /// Returns the conventional SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// One ordering term: an expression and a direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerm {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction.
    pub direction: Direction,
}

impl OrderTerm {
    /// Creates an ascending order term.
    #[must_use]
    pub const fn asc(expr: Expr) -> Self {
        Self {
            expr,
            direction: Direction::Asc,
        }
    }

    /// Creates a descending order term.
    #[must_use]
    pub const fn desc(expr: Expr) -> Self {
        Self {
            expr,
            direction: Direction::Desc,
        }
    }

    /// Returns the same term with the direction flipped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            direction: self.direction.reversed(),
        }
    }
}

/// A projected column: an expression with an optional alias.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl ProjectedColumn {
    /// Creates an unaliased projection.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates an aliased projection.
    #[must_use]
    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// A table or view name with an optional schema qualifier, detached from
/// the metadata arena so plans can outlive the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    /// Schema qualifier.
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
}

impl ObjectName {
    /// Creates an unqualified object name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Creates a schema-qualified object name.
    #[must_use]
    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl From<&QualifiedName> for ObjectName {
    fn from(name: &QualifiedName) -> Self {
        Self {
            schema: name.schema.as_ref().map(|s| s.as_str().to_string()),
            name: name.name.as_str().to_string(),
        }
    }
}

/// The row source of a select plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanSource {
    /// A base table or view.
    Data {
        /// The object name.
        name: ObjectName,
        /// Alias.
        alias: Option<String>,
    },
    /// A derived table.
    Subquery {
        /// The subquery.
        query: Box<SelectPlan>,
        /// Alias (required for derived tables).
        alias: String,
    },
    /// An inner join of two sources.
    Join {
        /// Left side.
        left: Box<PlanSource>,
        /// Right side.
        right: Box<PlanSource>,
        /// Join condition.
        on: Expr,
    },
}

impl PlanSource {
    /// Creates a base-table source.
    #[must_use]
    pub fn data(name: ObjectName) -> Self {
        Self::Data { name, alias: None }
    }

    /// Creates a derived-table source.
    #[must_use]
    pub fn subquery(query: SelectPlan, alias: impl Into<String>) -> Self {
        Self::Subquery {
            query: Box::new(query),
            alias: alias.into(),
        }
    }

    /// Joins this source with another on the given condition.
    #[must_use]
    pub fn join(self, right: Self, on: Expr) -> Self {
        Self::Join {
            left: Box::new(self),
            right: Box::new(right),
            on,
        }
    }
}

/// A select plan.
///
/// `top` caps the result to the first N rows in the plan's order; it is the
/// only cardinality primitive — there is deliberately no offset, which is
/// what makes the staged pagination planner necessary.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectPlan {
    /// Projected columns.
    pub columns: Vec<ProjectedColumn>,
    /// Row source.
    pub source: PlanSource,
    /// Filter predicate.
    pub filter: Option<Expr>,
    /// Ordering terms.
    pub order: Vec<OrderTerm>,
    /// First-N row cap.
    pub top: Option<u64>,
}

/// A row-count plan.
#[derive(Debug, Clone, PartialEq)]
pub struct CountPlan {
    /// Row source.
    pub source: PlanSource,
    /// Filter predicate.
    pub filter: Option<Expr>,
}

/// An existence-check plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsPlan {
    /// Row source.
    pub source: PlanSource,
    /// Filter predicate.
    pub filter: Option<Expr>,
}

/// A single-row insert plan.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlan {
    /// Target table.
    pub table: ObjectName,
    /// Column names, paired positionally with `values`.
    pub columns: Vec<String>,
    /// Value expressions (typically bind parameters).
    pub values: Vec<Expr>,
}

/// One SET assignment of an update plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column name.
    pub column: String,
    /// Value expression.
    pub value: Expr,
}

/// An update plan.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    /// Target table.
    pub table: ObjectName,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// Filter predicate.
    pub filter: Option<Expr>,
}

/// A delete plan.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletePlan {
    /// Target table.
    pub table: ObjectName,
    /// Filter predicate; `None` deletes every row.
    pub filter: Option<Expr>,
}

/// Any plan statement an emitter can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStatement {
    /// Select.
    Select(SelectPlan),
    /// Count.
    Count(CountPlan),
    /// Existence check.
    Exists(ExistsPlan),
    /// Single-row insert.
    Insert(InsertPlan),
    /// Update.
    Update(UpdatePlan),
    /// Delete.
    Delete(DeletePlan),
    /// One-time "enable identity insertion" prefix for the named table.
    EnableIdentityInsert(ObjectName),
}

/// A sequence of statements executed together as one round trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementBatch {
    /// The statements, in execution order.
    pub statements: Vec<PlanStatement>,
}

impl StatementBatch {
    /// Returns the number of statements in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
