//! Module: resolve
//! Responsibility: KeySourceResolver — extracting ordered key-source
//! values from a document and deciding whether regeneration is warranted.
//! Does not own: slugification, uniqueness, or target-field assignment.
//!
//! Invariants:
//! - `values` order always matches `source_specs` order.
//! - Relation-dereference failures are soft misses: surfaced to the hook
//!   sink, contributing nothing; they never abort resolution.

use crate::{
    config::{AutokeyConfig, SourceSpec},
    document::{Document, FieldShape},
    identity::DocumentId,
    obs::{self, HookEvent},
    store::KeyStore,
    value::Value,
};

///
/// Resolution
///
/// Outcome of one source-resolution pass.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Resolution {
    /// Contributed values, in `source_specs` order.
    pub values: Vec<String>,
    /// At least one source changed since load.
    pub modified: bool,
    /// At least one source was neither loaded nor modified; a complete
    /// key cannot be determined without it.
    pub incomplete: bool,
}

/// Resolve the configured source specs against `document`, dereferencing
/// to-one relations through `store`.
#[must_use]
pub fn resolve_sources(
    config: &AutokeyConfig,
    document: &dyn Document,
    store: &dyn KeyStore,
) -> Resolution {
    let mut resolution = Resolution::default();

    for spec in &config.source_specs {
        match document.field_shape(&spec.path) {
            Some(FieldShape::ToOne { target }) if spec.child.is_some() => {
                // The referenced entity's state cannot be known to be
                // unchanged, so the source always counts as modified.
                resolution.modified = true;
                resolve_relation(spec, &target, document, store, &mut resolution.values);
            }
            Some(_) => {
                if document.is_modified(&spec.path) {
                    resolution.modified = true;
                } else if !document.is_loaded(&spec.path) {
                    resolution.incomplete = true;
                }
                resolution
                    .values
                    .push(document.format_field(&spec.path, spec.format.as_deref()));
            }
            None => {
                let raw = document.get(&spec.path).unwrap_or(Value::Null);
                resolution.values.push(raw.to_string());

                if spec.path != document.identity_path()
                    && (document.is_virtual_path(&spec.path) || document.is_modified(&spec.path))
                {
                    resolution.modified = true;
                }
            }
        }
    }

    resolution
}

// Dereference a to-one relation and contribute the child field's value.
// Every miss is an event, not an error; a null relation is a silent skip.
fn resolve_relation(
    spec: &SourceSpec,
    target: &str,
    document: &dyn Document,
    store: &dyn KeyStore,
    values: &mut Vec<String>,
) {
    let Some(child) = spec.child.as_deref() else {
        return;
    };

    let relation_value = document.get(&spec.path).unwrap_or(Value::Null);
    if relation_value.is_null() {
        return;
    }

    let Some(id) = DocumentId::from_value(&relation_value) else {
        deref_miss(&spec.path, "relation value is not an identity");
        return;
    };

    match store.find_one_by_id(target, &id) {
        Ok(Some(entity)) => match entity.get(child) {
            Some(value) => values.push(value.to_string()),
            None => deref_miss(&spec.path, format!("missing child field '{child}'")),
        },
        Ok(None) => deref_miss(&spec.path, "referenced entity not found"),
        Err(err) => deref_miss(&spec.path, err.to_string()),
    }
}

fn deref_miss(path: &str, reason: impl Into<String>) {
    obs::record(HookEvent::RelationDerefMiss {
        path: path.to_string(),
        reason: reason.into(),
    });
}
