//! Module: allocate
//! Responsibility: UniqueKeyAllocator — finding the first free variant of
//! a candidate key by sequential suffix probing against the store.
//! Does not own: transactional exclusivity; the store's unique index is
//! the final backstop against racing saves.
//!
//! Invariants:
//! - Probing is iterative and strictly sequential; each probe depends on
//!   the previous query's result.
//! - A single match owned by the saving document is not a collision.
//! - Unbounded by default; `probe_limit` opts into a safety cap.

use crate::{
    config::{AutokeyConfig, ScopeFilter, Uniqueness},
    document::Document,
    error::AllocateError,
    obs::{self, HookEvent},
    store::KeyStore,
    value::Value,
};
use derive_more::{Deref, Display};

///
/// CandidateKey
///
/// An ephemeral candidate awaiting uniqueness confirmation. Stepping a
/// taken candidate increments a trailing `-<digits>` suffix, or appends
/// `-1` when none exists.
///

#[derive(Clone, Debug, Deref, Display, Eq, PartialEq)]
#[display("{_0}")]
pub struct CandidateKey(String);

impl CandidateKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The next candidate in the probing sequence.
    #[must_use]
    pub(crate) fn next(&self) -> Self {
        if let Some((base, digits)) = self.0.rsplit_once('-') {
            if !base.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            {
                // Suffixes past u128 range fall through to `-1` appending.
                if let Ok(n) = digits.parse::<u128>() {
                    return Self(format!("{base}-{}", n.saturating_add(1)));
                }
            }
        }

        Self(format!("{}-1", self.0))
    }
}

/// Resolve `candidate` to the first free key for `document`, per the
/// configured uniqueness scope. Store errors propagate and abort the save.
pub fn allocate(
    config: &AutokeyConfig,
    document: &dyn Document,
    store: &dyn KeyStore,
    candidate: CandidateKey,
) -> Result<String, AllocateError> {
    let filters = resolve_scope_filters(config, document);
    let identity = document.identity();

    let mut candidate = candidate;
    let mut collisions: u32 = 0;

    loop {
        let matches = store.find_matching(&config.target_path, candidate.as_str(), &filters)?;

        let taken = match matches.as_slice() {
            [] => false,
            [only] => !only.identity.matches(&identity),
            _ => true,
        };
        if !taken {
            return Ok(candidate.into_inner());
        }

        obs::record(HookEvent::ProbeCollision {
            candidate: candidate.to_string(),
        });

        collisions = collisions.saturating_add(1);
        if let Some(limit) = config.probe_limit {
            if collisions >= limit {
                return Err(AllocateError::ProbeLimit {
                    candidate: candidate.into_inner(),
                    limit,
                });
            }
        }

        candidate = candidate.next();
    }
}

// Scoping constraints are constant across probes: resolve once up front.
// A field reference to an absent field filters on null, mirroring an
// unset document value.
fn resolve_scope_filters(config: &AutokeyConfig, document: &dyn Document) -> Vec<(String, Value)> {
    let Uniqueness::Scoped(constraints) = &config.uniqueness else {
        return Vec::new();
    };

    constraints
        .iter()
        .map(|constraint| {
            let value = match &constraint.filter {
                ScopeFilter::Literal(value) => value.clone(),
                ScopeFilter::FieldRef(path) => document.get(path).unwrap_or(Value::Null),
            };
            (constraint.field.clone(), value)
        })
        .collect()
}
