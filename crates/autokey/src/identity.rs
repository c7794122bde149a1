//! Module: identity
//! Responsibility: normalized document identity and the single comparison
//! path used by collision resolution.
//! Does not own: identity generation or persistence key layout.
//!
//! Invariants:
//! - All identity comparison goes through [`DocumentId::matches`]; there is
//!   no ad-hoc string/native coercion anywhere else in the crate.
//! - `Display` output equals the canonical text used for comparison.

use crate::value::Value;
use std::fmt;
use ulid::Ulid;

///
/// DocumentId
///
/// A document identity in either native or textual form. The two forms
/// compare equal when their canonical text agrees, so a store that hands
/// back stringified ids still self-matches against a native id.
///

// No Hash/Ord derives: equality is normalized across variants, and derived
// hashing or ordering would disagree with it.
#[derive(Clone, Debug, Eq)]
pub enum DocumentId {
    Text(String),
    Ulid(Ulid),
}

impl DocumentId {
    #[must_use]
    /// Borrow or build the canonical textual form of this identity.
    pub fn canonical_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Ulid(u) => u.to_string(),
        }
    }

    #[must_use]
    /// Normalized identity comparison (replaces loose cross-type equality).
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Ulid(a), Self::Ulid(b)) => a == b,
            _ => self.canonical_text() == other.canonical_text(),
        }
    }

    #[must_use]
    /// Interpret a field value as a document identity, if it can be one.
    /// Numeric ids normalize to their textual form.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(Self::Text(s.clone())),
            Value::Ulid(u) => Some(Self::Ulid(*u)),
            Value::Uint(n) => Some(Self::Text(n.to_string())),
            Value::Int(n) => Some(Self::Text(n.to_string())),
            Value::Bool(_) | Value::Null => None,
        }
    }
}

impl PartialEq for DocumentId {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Ulid(u) => write!(f, "{u}"),
        }
    }
}
