// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/group_by_key_generator.rs
use crate::core::event::complex_event::ComplexEvent;
use std::fmt::Debug;

/// Derives the composite grouping key for an event.
pub trait GroupByKeyGenerator: Debug + Send + Sync {
    fn construct_event_key(&self, event: &dyn ComplexEvent) -> String;
}
