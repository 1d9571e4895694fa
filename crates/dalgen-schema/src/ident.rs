//! Case-insensitive SQL identifiers and qualified object names.
//!
//! SQL object names compare without case sensitivity, so raw `String`
//! comparison is wrong almost everywhere in this crate. `Ident` preserves
//! the spelling it was created with but compares and hashes case-insensitively.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A SQL identifier that compares case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(String);

impl Ident {
    /// Creates an identifier, preserving the given spelling.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Ident {}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A table or view name with an optional schema qualifier.
///
/// Equality follows `Ident` semantics on both parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Schema qualifier (e.g. `dbo`), if any.
    pub schema: Option<Ident>,
    /// Object name.
    pub name: Ident,
}

impl QualifiedName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Creates a schema-qualified name.
    #[must_use]
    pub fn with_schema(schema: impl Into<Ident>, name: impl Into<Ident>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ident_case_insensitive_eq() {
        assert_eq!(Ident::new("Customers"), Ident::new("CUSTOMERS"));
        assert_eq!(Ident::new("id"), Ident::new("Id"));
        assert_ne!(Ident::new("orders"), Ident::new("order_items"));
    }

    #[test]
    fn test_ident_preserves_spelling() {
        let ident = Ident::new("OrderItems");
        assert_eq!(ident.as_str(), "OrderItems");
        assert_eq!(ident.to_string(), "OrderItems");
    }

    #[test]
    fn test_ident_hash_matches_eq() {
        let mut set = HashSet::new();
        set.insert(Ident::new("Customers"));
        assert!(set.contains(&Ident::new("customers")));
    }

    #[test]
    fn test_qualified_name_display() {
        assert_eq!(QualifiedName::new("orders").to_string(), "orders");
        assert_eq!(
            QualifiedName::with_schema("dbo", "orders").to_string(),
            "dbo.orders"
        );
    }

    #[test]
    fn test_qualified_name_eq() {
        assert_eq!(
            QualifiedName::with_schema("DBO", "Orders"),
            QualifiedName::with_schema("dbo", "orders")
        );
        assert_ne!(
            QualifiedName::new("orders"),
            QualifiedName::with_schema("dbo", "orders")
        );
    }
}
