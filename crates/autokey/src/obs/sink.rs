//! Hook event sink boundary.
//!
//! The default sink accumulates [`super::counters`] state. Callers that
//! want to observe soft misses directly (the "surface warnings" policy)
//! install a scoped override with [`with_hook_sink`].

use crate::{hook::SkipReason, obs::counters};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn HookSink>>> = const { RefCell::new(None) };
}

///
/// HookEvent
///

#[derive(Clone, Debug)]
pub enum HookEvent {
    /// A relation dereference contributed no value. Non-fatal.
    RelationDerefMiss { path: String, reason: String },
    /// A collision probe found the candidate taken by another document.
    ProbeCollision { candidate: String },
    /// A key was assigned to the target field.
    KeyAssigned {
        target_path: String,
        unique_checked: bool,
    },
    /// The save cycle skipped key generation.
    KeySkipped { reason: SkipReason },
}

///
/// HookSink
///

pub trait HookSink {
    fn record(&self, event: HookEvent);
}

/// GlobalHookSink
/// Default sink: folds events into process-local counters.

pub(crate) struct GlobalHookSink;

impl HookSink for GlobalHookSink {
    fn record(&self, event: HookEvent) {
        counters::with_state_mut(|c| match event {
            HookEvent::RelationDerefMiss { .. } => {
                c.relation_deref_misses = c.relation_deref_misses.saturating_add(1);
            }
            HookEvent::ProbeCollision { .. } => {
                c.probe_collisions = c.probe_collisions.saturating_add(1);
            }
            HookEvent::KeyAssigned { .. } => {
                c.keys_assigned = c.keys_assigned.saturating_add(1);
            }
            HookEvent::KeySkipped { .. } => {
                c.keys_skipped = c.keys_skipped.saturating_add(1);
            }
        });
    }
}

pub(crate) fn record(event: HookEvent) {
    // Clone the handle out of the cell so the borrow is released before
    // the sink runs; a sink is free to call back into `record`.
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    if let Some(sink) = override_sink {
        sink.record(event);
    } else {
        GlobalHookSink.record(event);
    }
}

/// Run a closure with a temporary hook sink override. The previous sink
/// (if any) is restored on all exits, including unwind.
pub fn with_hook_sink<T>(sink: Box<dyn HookSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn HookSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0.take();
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(Rc::from(sink)));
    let _guard = Guard(prev);

    f()
}
