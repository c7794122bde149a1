//! Module: config
//! Responsibility: parsing and holding the immutable autokey configuration
//! attached to a schema at registration time.
//! Does not own: runtime resolution or allocation; those read this config
//! but never mutate it.
//!
//! Invariants:
//! - `source_specs` is non-empty and `target_path` is non-empty.
//! - Constructed once per schema; immutable for the schema's lifetime.
//! - Missing `from`/`path` fail fast with [`ConfigError`].

mod source;

pub use source::SourceSpec;

use crate::{error::ConfigError, value::Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker prefix selecting a field reference in a scoped-uniqueness value.
pub const FIELD_REF_MARKER: char = ':';

///
/// SourceList
///
/// The `from` option accepts one space-separated string or a sequence.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SourceList {
    One(String),
    Many(Vec<String>),
}

///
/// ScopeLiteral
///
/// Literal values accepted in a scoped-uniqueness mapping.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ScopeLiteral {
    Bool(bool),
    Uint(u64),
    Int(i64),
    Text(String),
}

impl From<ScopeLiteral> for Value {
    fn from(literal: ScopeLiteral) -> Self {
        match literal {
            ScopeLiteral::Bool(v) => Self::Bool(v),
            ScopeLiteral::Uint(v) => Self::Uint(v),
            ScopeLiteral::Int(v) => Self::Int(v),
            ScopeLiteral::Text(v) => Self::Text(v),
        }
    }
}

///
/// UniqueOption
///
/// The `unique` option: a flag, or a mapping of extra equality
/// constraints scoping the uniqueness domain.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UniqueOption {
    Flag(bool),
    Scoped(BTreeMap<String, ScopeLiteral>),
}

impl Default for UniqueOption {
    fn default() -> Self {
        Self::Flag(false)
    }
}

///
/// AutokeyOptions
///
/// Raw configuration input as supplied by the host schema definition.
/// Validated into an [`AutokeyConfig`] at registration time.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutokeyOptions {
    pub from: Option<SourceList>,
    pub path: Option<String>,
    pub unique: UniqueOption,
    pub fixed: bool,
    pub ignore_incomplete_source: bool,
    pub locale: Option<String>,
    pub probe_limit: Option<u32>,
}

///
/// ScopeFilter
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScopeFilter {
    /// Literal equality filter value.
    Literal(Value),
    /// Resolved against the saving document's current field value.
    FieldRef(String),
}

///
/// ScopeConstraint
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScopeConstraint {
    pub field: String,
    pub filter: ScopeFilter,
}

///
/// Uniqueness
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Uniqueness {
    Disabled,
    Global,
    Scoped(Vec<ScopeConstraint>),
}

///
/// IndexKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexKind {
    Plain,
    Unique,
}

///
/// KeyFieldRegistration
///
/// One-time schema side effect descriptor: the host declares the target
/// field as an indexed string using this.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyFieldRegistration {
    pub path: String,
    pub index: IndexKind,
}

///
/// AutokeyConfig
///
/// Validated, immutable autokey configuration for one schema.
///

#[derive(Clone, Debug)]
pub struct AutokeyConfig {
    pub collection: String,
    pub source_specs: Vec<SourceSpec>,
    pub target_path: String,
    pub uniqueness: Uniqueness,
    pub fixed: bool,
    pub allow_incomplete_source: bool,
    pub locale: Option<String>,
    /// Optional cap on collision probes. `None` leaves the probe loop
    /// unbounded, matching the behavior documented as a scaling limit.
    pub probe_limit: Option<u32>,
}

impl AutokeyConfig {
    /// Validate raw options into an immutable config. Fails fast when
    /// `from` or `path` is missing or empty.
    pub fn new(collection: &str, options: AutokeyOptions) -> Result<Self, ConfigError> {
        let raw_sources = match options.from {
            Some(SourceList::One(s)) => s.split_whitespace().map(str::to_string).collect(),
            Some(SourceList::Many(v)) => v,
            None => Vec::new(),
        };
        if raw_sources.is_empty() {
            return Err(ConfigError::MissingFrom {
                collection: collection.to_string(),
            });
        }

        let target_path = match options.path {
            Some(p) if !p.is_empty() => p,
            _ => {
                return Err(ConfigError::MissingPath {
                    collection: collection.to_string(),
                });
            }
        };

        let source_specs = raw_sources
            .iter()
            .map(|raw| SourceSpec::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let uniqueness = match options.unique {
            UniqueOption::Flag(false) => Uniqueness::Disabled,
            UniqueOption::Flag(true) => Uniqueness::Global,
            UniqueOption::Scoped(map) => {
                let constraints = map
                    .into_iter()
                    .map(|(field, literal)| ScopeConstraint {
                        field,
                        filter: parse_scope_filter(literal),
                    })
                    .collect();
                Uniqueness::Scoped(constraints)
            }
        };

        Ok(Self {
            collection: collection.to_string(),
            source_specs,
            target_path,
            uniqueness,
            fixed: options.fixed,
            allow_incomplete_source: options.ignore_incomplete_source,
            locale: options.locale,
            probe_limit: options.probe_limit,
        })
    }

    #[must_use]
    /// Whether any uniqueness constraint is configured.
    pub const fn is_unique(&self) -> bool {
        !matches!(self.uniqueness, Uniqueness::Disabled)
    }

    #[must_use]
    /// Describe the schema registration side effect for the target field.
    pub fn registration(&self) -> KeyFieldRegistration {
        let index = if self.is_unique() {
            IndexKind::Unique
        } else {
            IndexKind::Plain
        };

        KeyFieldRegistration {
            path: self.target_path.clone(),
            index,
        }
    }
}

// A leading marker character turns a text literal into a field reference.
fn parse_scope_filter(literal: ScopeLiteral) -> ScopeFilter {
    if let ScopeLiteral::Text(s) = &literal {
        if let Some(field_ref) = s.strip_prefix(FIELD_REF_MARKER) {
            return ScopeFilter::FieldRef(field_ref.to_string());
        }
    }

    ScopeFilter::Literal(literal.into())
}
