//! Module: document
//! Responsibility: the document collaborator contract the hook requires
//! from the host framework.
//! Does not own: field typing, validation, or persistence; the host
//! implements this over its own document representation.

use crate::{identity::DocumentId, value::Value};

///
/// FieldShape
///
/// Explicit capability tag for a structured field, replacing runtime
/// type reflection. `target` is the referenced collection for relations.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldShape {
    Scalar,
    ToOne { target: String },
    ToMany { target: String },
}

///
/// Document
///
/// The saving document as seen by the key-generation hook: field access,
/// per-path loaded/modified predicates, identity, and shape introspection.
/// All paths are host-framework field names.
///

pub trait Document {
    /// The document's identity.
    fn identity(&self) -> DocumentId;

    /// Current value at `path`, if any.
    fn get(&self, path: &str) -> Option<Value>;

    /// Assign `value` at `path`. Only the target key field is ever set by
    /// this crate, once per save cycle.
    fn set(&mut self, path: &str, value: Value);

    /// Whether `path` was loaded from the store (selected) for this
    /// document instance.
    fn is_loaded(&self, path: &str) -> bool;

    /// Whether `path` was modified since load.
    fn is_modified(&self, path: &str) -> bool;

    /// Shape of the structured field at `path`, or `None` when no
    /// structured field exists by that name (computed path, raw attribute).
    fn field_shape(&self, path: &str) -> Option<FieldShape>;

    /// Whether `path` is a computed/virtual path rather than stored data.
    fn is_virtual_path(&self, path: &str) -> bool;

    /// Render the field at `path` using the field's own formatting rule,
    /// parameterized by the source spec's `format` string.
    fn format_field(&self, path: &str, format: Option<&str>) -> String;

    /// Name of the identity field. Virtual-path modification tracking
    /// exempts this path.
    fn identity_path(&self) -> &str {
        "id"
    }
}
