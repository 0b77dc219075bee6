// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/state/populater/state_event_populator.rs
use crate::core::event::complex_event::ComplexEvent;
use std::fmt::Debug;

/// Copies stream-level attribute values into the shared state-event shape
/// consumed by attribute processors and the having predicate.
///
/// Implementations must be idempotent; the selector calls this exactly once
/// per CURRENT/EXPIRED event, before any attribute processor touches it.
pub trait StateEventPopulator: Debug + Send + Sync {
    fn populate_state_event(&self, complex_event: &mut dyn ComplexEvent);
}
