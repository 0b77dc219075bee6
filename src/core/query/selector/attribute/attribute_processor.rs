// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/attribute_processor.rs
use crate::core::event::complex_event::ComplexEvent;
use std::fmt::Debug;

/// One projection or aggregation step of the select clause.
///
/// The selector runs every processor, in configured order, for each
/// CURRENT/EXPIRED event (and for RESET events, so aggregators can reset
/// their accumulators). `group_key` carries the key of the group the event
/// belongs to while a grouped strategy is active; aggregation-aware
/// processors use it to route the update to the right per-group accumulator.
/// Implementations holding mutable aggregation state use interior mutability;
/// the selector serializes all calls for a given instance.
pub trait AttributeProcessor: Debug + Send + Sync {
    fn process(&self, event: &mut dyn ComplexEvent, group_key: Option<&str>);

    /// Fresh-state copy of this processor for the given partition key.
    fn clone_processor(&self, key: &str) -> Box<dyn AttributeProcessor>;
}
