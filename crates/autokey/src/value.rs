//! Module: value
//! Responsibility: the minimal field-value vocabulary exchanged with the
//! document and persistence collaborators.
//! Does not own: host field typing, formatting rules, or storage encoding.
//!
//! Invariants:
//! - `Display` is the canonical key-source rendering; `Null` renders empty.
//! - Equality is exact (no cross-variant coercion); identity coercion lives
//!   in [`crate::identity::DocumentId`] instead.

use std::fmt;
use ulid::Ulid;

///
/// Value
///
/// A field value as seen by the key-generation hook. Deliberately small:
/// only the variants that can contribute key-source text, scope a
/// uniqueness filter, or carry a document identity.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Null,
    Text(String),
    Uint(u64),
    Ulid(Ulid),
}

impl Value {
    #[must_use]
    /// Return whether this value is the null sentinel.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Null => Ok(()),
            Self::Text(v) => f.write_str(v),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Ulid(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<Ulid> for Value {
    fn from(v: Ulid) -> Self {
        Self::Ulid(v)
    }
}
