//! Module: obs
//! Responsibility: observability for the key-generation hook.
//! Core logic MUST NOT touch counter state directly; all instrumentation
//! flows through [`HookEvent`] and [`HookSink`].

pub mod counters;
pub mod sink;

pub use counters::{HookCounters, counters_report, counters_reset};
pub use sink::{HookEvent, HookSink, with_hook_sink};

pub(crate) use sink::record;
