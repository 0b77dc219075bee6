// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/grouped_complex_event.rs
use super::complex_event::{ComplexEvent, ComplexEventType};
use super::value::AttributeValue;
use std::any::Any;

/// An event tagged with its computed group key.
///
/// Grouped output paths emit these so downstream consumers can tell which
/// group a row belongs to. All `ComplexEvent` behavior delegates to the
/// wrapped event, so comparators and consumers that only look at output data
/// treat it like any other event.
#[derive(Debug)]
pub struct GroupedComplexEvent {
    group_key: String,
    event: Box<dyn ComplexEvent>,
}

impl GroupedComplexEvent {
    pub fn new(group_key: String, event: Box<dyn ComplexEvent>) -> Self {
        GroupedComplexEvent { group_key, event }
    }

    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    pub fn inner(&self) -> &dyn ComplexEvent {
        self.event.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn ComplexEvent> {
        self.event
    }
}

impl ComplexEvent for GroupedComplexEvent {
    fn get_timestamp(&self) -> i64 {
        self.event.get_timestamp()
    }
    fn set_timestamp(&mut self, timestamp: i64) {
        self.event.set_timestamp(timestamp);
    }

    fn get_event_type(&self) -> ComplexEventType {
        self.event.get_event_type()
    }
    fn set_event_type(&mut self, event_type: ComplexEventType) {
        self.event.set_event_type(event_type);
    }

    fn get_output_data(&self) -> Option<&[AttributeValue]> {
        self.event.get_output_data()
    }
    fn set_output_data(&mut self, data: Option<Vec<AttributeValue>>) {
        self.event.set_output_data(data);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
