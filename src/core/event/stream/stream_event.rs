// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/stream_event.rs
use crate::core::event::complex_event::{ComplexEvent, ComplexEventType};
use crate::core::event::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Concrete event carrier for stream processing.
///
/// `before_window_data` holds the raw stream fields as delivered by the
/// upstream operator; `output_data` is the projection slot area filled in by
/// attribute processors and read by the having predicate, order-by comparator
/// and downstream consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamEvent {
    pub timestamp: i64,
    pub event_type: ComplexEventType,
    pub before_window_data: Vec<AttributeValue>,
    pub output_data: Option<Vec<AttributeValue>>,
}

impl StreamEvent {
    pub fn new(timestamp: i64, before_window_data_size: usize, output_data_size: usize) -> Self {
        StreamEvent {
            timestamp,
            event_type: ComplexEventType::default(),
            before_window_data: vec![AttributeValue::default(); before_window_data_size],
            output_data: if output_data_size > 0 {
                Some(vec![AttributeValue::default(); output_data_size])
            } else {
                None
            },
        }
    }

    /// Create a CURRENT event carrying the given raw stream fields.
    pub fn new_with_data(timestamp: i64, data: Vec<AttributeValue>) -> Self {
        StreamEvent {
            timestamp,
            event_type: ComplexEventType::Current,
            before_window_data: data,
            output_data: None,
        }
    }

    pub fn with_event_type(mut self, event_type: ComplexEventType) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn get_attribute(&self, index: usize) -> Option<&AttributeValue> {
        self.before_window_data.get(index)
    }

    pub fn set_output_data_at_idx(
        &mut self,
        value: AttributeValue,
        index: usize,
    ) -> Result<(), String> {
        match self.output_data {
            Some(ref mut vec) if index < vec.len() => {
                vec[index] = value;
                Ok(())
            }
            Some(_) => Err("index out of bounds".into()),
            None => Err("output_data is None".into()),
        }
    }
}

impl ComplexEvent for StreamEvent {
    fn get_timestamp(&self) -> i64 {
        self.timestamp
    }
    fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    fn get_event_type(&self) -> ComplexEventType {
        self.event_type
    }
    fn set_event_type(&mut self, event_type: ComplexEventType) {
        self.event_type = event_type;
    }

    fn get_output_data(&self) -> Option<&[AttributeValue]> {
        self.output_data.as_deref()
    }
    fn set_output_data(&mut self, data: Option<Vec<AttributeValue>>) {
        self.output_data = data;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
