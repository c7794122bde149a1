//! Module: error
//! Responsibility: the error taxonomy for key generation.
//! Does not own: soft misses — relation-dereference failures are events,
//! not errors, and flow through [`crate::obs`] instead.
//!
//! Three tiers:
//! - [`ConfigError`]: fatal, synchronous, raised at schema-registration time.
//! - [`StoreError`]: operational, constructed by the persistence collaborator
//!   and propagated to the caller.
//! - [`HookError`]: the umbrella surfaced by the save hook.

use thiserror::Error as ThisError;

///
/// ConfigError
///
/// Construction-time configuration failures. These abort schema
/// registration; there is no recovery path.
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid autokey option for {collection} (from is required)")]
    MissingFrom { collection: String },

    #[error("invalid autokey option for {collection} (path is required)")]
    MissingPath { collection: String },

    #[error("invalid autokey source spec '{spec}' (empty path)")]
    EmptySourcePath { spec: String },
}

///
/// StoreError
///
/// Persistence-layer failures. Implementations of
/// [`crate::store::KeyStore`] construct these; the allocator propagates
/// them, the resolver swallows them as soft misses.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("store query failed: {message}")]
    Query { message: String },

    #[error("store fetch failed: {message}")]
    Fetch { message: String },
}

impl StoreError {
    /// Construct a query-side store failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Construct a fetch-side store failure.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }
}

///
/// AllocateError
///

#[derive(Debug, ThisError)]
pub enum AllocateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unique key probe limit {limit} exceeded at candidate '{candidate}'")]
    ProbeLimit { candidate: String, limit: u32 },
}

///
/// HookError
///
/// Everything the save hook can surface to the host lifecycle pipeline.
/// Any error here aborts the save; the target field is left untouched.
///

#[derive(Debug, ThisError)]
pub enum HookError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Allocate(#[from] AllocateError),
}
