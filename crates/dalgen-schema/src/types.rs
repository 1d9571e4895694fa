//! Portable value types and server credentials.

use serde::{Deserialize, Serialize};

/// Portable database type codes.
///
/// Each field carries one of these alongside the dialect-specific type name
/// reported by the server, so planners can reason about values without
/// knowing the target dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Boolean.
    Bool,
    /// 16-bit integer.
    Int16,
    /// 32-bit integer.
    Int32,
    /// 64-bit integer.
    Int64,
    /// Single-precision float.
    Float32,
    /// Double-precision float.
    Float64,
    /// Fixed-point decimal.
    Decimal,
    /// Character data.
    Text,
    /// Binary data.
    Bytes,
    /// Date and time.
    DateTime,
    /// UUID.
    Uuid,
    /// JSON document.
    Json,
}

impl ValueType {
    /// Returns whether values of this type are textual.
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Json)
    }

    /// Returns whether values of this type are numeric.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int16 | Self::Int32 | Self::Int64 | Self::Float32 | Self::Float64 | Self::Decimal
        )
    }
}

/// Login credential for a source server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Credential {
    /// Integrated (OS-level) authentication.
    Integrated,
    /// Explicit user/password login.
    UserPassword {
        /// Login user name.
        user: String,
        /// Login password.
        password: String,
    },
}

impl Credential {
    /// Returns whether this credential uses integrated authentication.
    #[must_use]
    pub const fn is_integrated(&self) -> bool {
        matches!(self, Self::Integrated)
    }
}
