//! Module: store
//! Responsibility: the persistence collaborator contract for uniqueness
//! probing and relationship dereference.
//! Does not own: transactional exclusivity — the store's own unique
//! index, when declared, is the final backstop behind the probe loop.

use crate::{error::StoreError, identity::DocumentId, value::Value};
use std::collections::BTreeMap;

///
/// KeyMatch
///
/// One document matching a candidate-key query. Only identity matters to
/// collision resolution.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyMatch {
    pub identity: DocumentId,
}

impl KeyMatch {
    #[must_use]
    pub const fn new(identity: DocumentId) -> Self {
        Self { identity }
    }
}

///
/// RelatedEntity
///
/// A dereferenced to-one relation target, reduced to its field values.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RelatedEntity {
    fields: BTreeMap<String, Value>,
}

impl RelatedEntity {
    #[must_use]
    pub const fn new(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.fields.get(path)
    }
}

impl FromIterator<(String, Value)> for RelatedEntity {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

///
/// KeyStore
///
/// Read-side persistence collaborator. `find_matching` backs the
/// collision probe; `find_one_by_id` backs relationship dereference.
///

pub trait KeyStore {
    /// All documents whose `target_path` field equals `value`, filtered by
    /// the resolved scoping constraints (field, equality value) in order.
    fn find_matching(
        &self,
        target_path: &str,
        value: &str,
        filters: &[(String, Value)],
    ) -> Result<Vec<KeyMatch>, StoreError>;

    /// Fetch one entity by identity from `collection`, or `None` when the
    /// referenced entity no longer exists.
    fn find_one_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<RelatedEntity>, StoreError>;
}
