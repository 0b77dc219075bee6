// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/complex_event.rs
use super::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;

/// Kind of a complex event flowing through the selection pipeline.
///
/// `Current` and `Expired` are additions/retractions subject to projection and
/// filtering. `Reset` carries no output but must still reach every attribute
/// processor so aggregators can reset their accumulators. `Timer` only drives
/// state transitions upstream and never produces output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComplexEventType {
    #[default]
    Current,
    Expired,
    Timer,
    Reset,
}

/// Trait for events processed by the query selector.
///
/// The output data slice is the slot area attribute processors project into;
/// raw stream fields live on the concrete type and are reached through
/// `as_any` downcasts by collaborators that know the event shape.
pub trait ComplexEvent: Debug + Send + Sync + 'static {
    fn get_timestamp(&self) -> i64;
    fn set_timestamp(&mut self, timestamp: i64);

    fn get_event_type(&self) -> ComplexEventType;
    fn set_event_type(&mut self, event_type: ComplexEventType);

    fn get_output_data(&self) -> Option<&[AttributeValue]>;
    fn set_output_data(&mut self, data: Option<Vec<AttributeValue>>);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn is_expired(&self) -> bool {
        self.get_event_type() == ComplexEventType::Expired
    }
}
