//! Module: hook
//! Responsibility: the save-hook orchestrator — a blocking pre-commit
//! step that resolves sources, derives a slug, and assigns the target
//! field before the save proceeds.
//! Does not own: the save itself; terminal `Skipped`/`Set` states hand
//! control back to the host lifecycle pipeline.
//!
//! Invariants:
//! - The hook completes (resolves or errors) before the save proceeds.
//! - On error nothing is assigned; the error aborts the save chain.

use crate::{
    allocate::{CandidateKey, allocate},
    config::AutokeyConfig,
    document::Document,
    error::HookError,
    obs::{self, HookEvent},
    resolve::resolve_sources,
    slug::slug,
    store::KeyStore,
    value::Value,
};
use std::fmt;

///
/// HookState
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HookState {
    NotEvaluated,
    Skipped,
    Generating,
    Resolving,
    Set,
}

///
/// SkipReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// Source fields were not completely loaded and the config does not
    /// allow generating from a partial source.
    IncompleteSource,
    /// Sources unchanged (or key fixed) and the target already carries a
    /// value or is not loaded.
    UnchangedTarget,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::IncompleteSource => "incomplete_source",
            Self::UnchangedTarget => "unchanged_target",
        };
        f.write_str(label)
    }
}

///
/// HookOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HookOutcome {
    /// No key change; the save proceeds untouched.
    Skipped { reason: SkipReason },
    /// A key was assigned to the target field.
    Set { key: String, unique_checked: bool },
}

///
/// SaveHook
///
/// One save cycle's key-generation pass over a document. Holds the
/// lifecycle state so callers (and tests) can observe where the pass
/// terminated.
///

pub struct SaveHook<'a> {
    config: &'a AutokeyConfig,
    state: HookState,
}

impl<'a> SaveHook<'a> {
    #[must_use]
    pub const fn new(config: &'a AutokeyConfig) -> Self {
        Self {
            config,
            state: HookState::NotEvaluated,
        }
    }

    #[must_use]
    pub const fn state(&self) -> HookState {
        self.state
    }

    /// Run the pre-save pass. Errors abort the save; the target field is
    /// only assigned on the `Set` path.
    pub fn run(
        &mut self,
        document: &mut dyn Document,
        store: &dyn KeyStore,
    ) -> Result<HookOutcome, HookError> {
        let config = self.config;
        let resolution = resolve_sources(config, document, store);

        if resolution.incomplete && !config.allow_incomplete_source {
            return Ok(self.skip(SkipReason::IncompleteSource));
        }

        let regenerate = resolution.modified && !config.fixed;
        if !regenerate
            && (target_has_value(document, &config.target_path)
                || !document.is_loaded(&config.target_path))
        {
            return Ok(self.skip(SkipReason::UnchangedTarget));
        }

        self.state = HookState::Generating;
        let joined = resolution.values.join(" ");
        let mut key = slug(&joined, config.locale.as_deref());
        if key.is_empty() {
            // All sources blank: fall back to the identity string.
            key = document.identity().to_string();
        }

        let unique_checked = config.is_unique();
        if unique_checked {
            self.state = HookState::Resolving;
            key = allocate(config, document, store, CandidateKey::new(key))?;
        }

        document.set(&config.target_path, Value::Text(key.clone()));
        self.state = HookState::Set;

        obs::record(HookEvent::KeyAssigned {
            target_path: config.target_path.clone(),
            unique_checked,
        });

        Ok(HookOutcome::Set {
            key,
            unique_checked,
        })
    }

    fn skip(&mut self, reason: SkipReason) -> HookOutcome {
        self.state = HookState::Skipped;
        obs::record(HookEvent::KeySkipped { reason });

        HookOutcome::Skipped { reason }
    }
}

/// Run one pre-save key-generation pass with a throwaway hook.
pub fn run_pre_save(
    config: &AutokeyConfig,
    document: &mut dyn Document,
    store: &dyn KeyStore,
) -> Result<HookOutcome, HookError> {
    SaveHook::new(config).run(document, store)
}

// The target counts as set only when it holds a non-empty value. The key
// field is registered as a string; a non-text value still counts as set.
fn target_has_value(document: &dyn Document, path: &str) -> bool {
    match document.get(path) {
        Some(Value::Text(s)) => !s.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}
