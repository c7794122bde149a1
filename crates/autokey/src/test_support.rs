//! Shared in-memory collaborators for crate tests.

use crate::{
    document::{Document, FieldShape},
    error::StoreError,
    identity::DocumentId,
    store::{KeyMatch, KeyStore, RelatedEntity},
    value::Value,
};
use std::collections::{BTreeMap, BTreeSet};

///
/// MockDocument
///
/// Builder-style fake over the [`Document`] contract. Fields registered
/// through `with_field`/`with_relation` are structured; `with_raw` and
/// `with_virtual` paths stay unstructured.
///

pub(crate) struct MockDocument {
    identity: DocumentId,
    values: BTreeMap<String, Value>,
    shapes: BTreeMap<String, FieldShape>,
    modified: BTreeSet<String>,
    unloaded: BTreeSet<String>,
    virtual_paths: BTreeSet<String>,
}

impl MockDocument {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            identity: DocumentId::Text(id.to_string()),
            values: BTreeMap::new(),
            shapes: BTreeMap::new(),
            modified: BTreeSet::new(),
            unloaded: BTreeSet::new(),
            virtual_paths: BTreeSet::new(),
        }
    }

    /// Structured scalar field with a value.
    pub(crate) fn with_field(mut self, path: &str, value: &str) -> Self {
        self.values.insert(path.to_string(), Value::from(value));
        self.shapes.insert(path.to_string(), FieldShape::Scalar);
        self
    }

    /// Structured to-one relation holding the referenced identity.
    pub(crate) fn with_relation(mut self, path: &str, target: &str, id: &str) -> Self {
        self.values.insert(path.to_string(), Value::from(id));
        self.shapes.insert(
            path.to_string(),
            FieldShape::ToOne {
                target: target.to_string(),
            },
        );
        self
    }

    /// Structured to-one relation with no referenced entity.
    pub(crate) fn with_null_relation(mut self, path: &str, target: &str) -> Self {
        self.values.insert(path.to_string(), Value::Null);
        self.shapes.insert(
            path.to_string(),
            FieldShape::ToOne {
                target: target.to_string(),
            },
        );
        self
    }

    /// Unstructured raw attribute.
    pub(crate) fn with_raw(mut self, path: &str, value: &str) -> Self {
        self.values.insert(path.to_string(), Value::from(value));
        self
    }

    /// Unstructured virtual path.
    pub(crate) fn with_virtual(mut self, path: &str, value: &str) -> Self {
        self.values.insert(path.to_string(), Value::from(value));
        self.virtual_paths.insert(path.to_string());
        self
    }

    pub(crate) fn modified(mut self, path: &str) -> Self {
        self.modified.insert(path.to_string());
        self
    }

    pub(crate) fn unloaded(mut self, path: &str) -> Self {
        self.unloaded.insert(path.to_string());
        self
    }
}

impl Document for MockDocument {
    fn identity(&self) -> DocumentId {
        self.identity.clone()
    }

    fn get(&self, path: &str) -> Option<Value> {
        self.values.get(path).cloned()
    }

    fn set(&mut self, path: &str, value: Value) {
        self.values.insert(path.to_string(), value);
    }

    fn is_loaded(&self, path: &str) -> bool {
        !self.unloaded.contains(path)
    }

    fn is_modified(&self, path: &str) -> bool {
        self.modified.contains(path)
    }

    fn field_shape(&self, path: &str) -> Option<FieldShape> {
        self.shapes.get(path).cloned()
    }

    fn is_virtual_path(&self, path: &str) -> bool {
        self.virtual_paths.contains(path)
    }

    fn format_field(&self, path: &str, _format: Option<&str>) -> String {
        self.values
            .get(path)
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

///
/// MemoryKeyStore
///
/// In-memory [`KeyStore`] with per-method failure injection.
///

#[derive(Default)]
pub(crate) struct MemoryKeyStore {
    rows: Vec<KeyRow>,
    related: BTreeMap<(String, String), RelatedEntity>,
    fail_matching: Option<String>,
    fail_fetch: Option<String>,
}

struct KeyRow {
    identity: DocumentId,
    key: String,
    fields: BTreeMap<String, Value>,
}

impl MemoryKeyStore {
    /// Existing document occupying `key`.
    pub(crate) fn with_key(self, id: &str, key: &str) -> Self {
        self.with_scoped_key(id, key, &[])
    }

    /// Existing document occupying `key` with extra scoping fields.
    pub(crate) fn with_scoped_key(mut self, id: &str, key: &str, fields: &[(&str, &str)]) -> Self {
        self.rows.push(KeyRow {
            identity: DocumentId::Text(id.to_string()),
            key: key.to_string(),
            fields: fields
                .iter()
                .map(|(f, v)| ((*f).to_string(), Value::from(*v)))
                .collect(),
        });
        self
    }

    /// Dereferenceable related entity in `collection`.
    pub(crate) fn with_related(
        mut self,
        collection: &str,
        id: &str,
        fields: &[(&str, &str)],
    ) -> Self {
        let entity: RelatedEntity = fields
            .iter()
            .map(|(f, v)| ((*f).to_string(), Value::from(*v)))
            .collect();
        self.related
            .insert((collection.to_string(), id.to_string()), entity);
        self
    }

    pub(crate) fn failing_matching(mut self, message: &str) -> Self {
        self.fail_matching = Some(message.to_string());
        self
    }

    pub(crate) fn failing_fetch(mut self, message: &str) -> Self {
        self.fail_fetch = Some(message.to_string());
        self
    }
}

impl KeyStore for MemoryKeyStore {
    fn find_matching(
        &self,
        _target_path: &str,
        value: &str,
        filters: &[(String, Value)],
    ) -> Result<Vec<KeyMatch>, StoreError> {
        if let Some(message) = &self.fail_matching {
            return Err(StoreError::query(message));
        }

        let matches = self
            .rows
            .iter()
            .filter(|row| row.key == value)
            .filter(|row| {
                filters
                    .iter()
                    .all(|(field, expected)| row.fields.get(field) == Some(expected))
            })
            .map(|row| KeyMatch::new(row.identity.clone()))
            .collect();

        Ok(matches)
    }

    fn find_one_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<RelatedEntity>, StoreError> {
        if let Some(message) = &self.fail_fetch {
            return Err(StoreError::fetch(message));
        }

        Ok(self
            .related
            .get(&(collection.to_string(), id.canonical_text()))
            .cloned())
    }
}
