//! Error types for plan construction.

use thiserror::Error;

use dalgen_schema::SchemaError;

/// Errors raised while building operation plans.
///
/// Planning is pure computation over immutable metadata, so every variant
/// is a fail-fast validation result; nothing here is retryable.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A caller-supplied argument violated a precondition.
    #[error("invalid {parameter}: {message}")]
    Precondition {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The foreign-key graph loops back onto a table already on the
    /// current cascade chain.
    #[error("cyclic foreign-key reference through table '{table}'")]
    CyclicReference {
        /// The table that closed the cycle.
        table: String,
    },

    /// Both connection-string candidate lists were empty.
    #[error("no connection string candidates available")]
    NoConnectionCandidates,

    /// Underlying schema metadata error.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl PlanError {
    /// Creates a precondition violation for the named parameter.
    #[must_use]
    pub fn precondition(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::Precondition {
            parameter,
            message: message.into(),
        }
    }
}

/// Result type for planning operations.
pub type Result<T> = std::result::Result<T, PlanError>;
