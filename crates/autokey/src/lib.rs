//! Autokey: a pre-save hook that derives and maintains a unique,
//! human-readable slug key on a document whenever configured source
//! fields change, resolving collisions by suffixing an incrementing
//! counter.
//!
//! The host content-modeling framework implements the [`document`] and
//! [`store`] collaborator contracts and invokes [`hook::run_pre_save`]
//! immediately before persistence.

pub mod allocate;
pub mod config;
pub mod document;
pub mod error;
pub mod hook;
pub mod identity;
pub mod obs;
pub mod resolve;
pub mod slug;
pub mod store;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        config::{AutokeyConfig, AutokeyOptions},
        document::{Document, FieldShape},
        hook::{HookOutcome, SaveHook, run_pre_save},
        identity::DocumentId,
        store::KeyStore,
        value::Value,
    };
}
