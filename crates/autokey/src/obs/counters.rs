//! Process-local hook counters.
//!
//! Populated by the default sink only; a scoped sink override bypasses
//! this state entirely.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// HookCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct HookCounters {
    /// Relation dereferences that contributed no value (fetch error,
    /// deleted target, missing child field).
    pub relation_deref_misses: u64,
    /// Collision probes that found the candidate taken.
    pub probe_collisions: u64,
    /// Keys assigned to a target field.
    pub keys_assigned: u64,
    /// Save cycles that skipped key generation.
    pub keys_skipped: u64,
}

thread_local! {
    static STATE: RefCell<HookCounters> = RefCell::new(HookCounters::default());
}

pub(crate) fn with_state_mut<T>(f: impl FnOnce(&mut HookCounters) -> T) -> T {
    STATE.with(|cell| f(&mut cell.borrow_mut()))
}

/// Snapshot the current counter state.
#[must_use]
pub fn counters_report() -> HookCounters {
    STATE.with(|cell| cell.borrow().clone())
}

/// Reset all counter state.
pub fn counters_reset() {
    STATE.with(|cell| {
        *cell.borrow_mut() = HookCounters::default();
    });
}
