// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared collaborators for query selector integration tests: a recording
//! projection processor, a per-group sum aggregator, field-based key
//! generator / having / comparator implementations and a collecting rate
//! limiter.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use streamselect::core::executor::ConditionExecutor;
use streamselect::core::query::output::OutputRateLimiter;
use streamselect::core::query::selector::{
    AttributeProcessor, GroupByKeyGenerator, OrderByEventComparator,
};
use streamselect::{
    AttributeValue, ComplexEvent, ComplexEventChunk, ComplexEventType, GroupedComplexEvent,
    StreamEvent,
};

pub fn event(kind: ComplexEventType, values: Vec<AttributeValue>) -> Box<dyn ComplexEvent> {
    Box::new(StreamEvent::new_with_data(0, values).with_event_type(kind))
}

pub fn current(values: Vec<AttributeValue>) -> Box<dyn ComplexEvent> {
    event(ComplexEventType::Current, values)
}

pub fn expired(values: Vec<AttributeValue>) -> Box<dyn ComplexEvent> {
    event(ComplexEventType::Expired, values)
}

pub fn chunk_of(events: Vec<Box<dyn ComplexEvent>>, is_batch: bool) -> ComplexEventChunk {
    ComplexEventChunk::from_events(events, is_batch)
}

/// Raw stream field of an event, reaching through a grouped wrapper if needed.
pub fn raw_field(event: &dyn ComplexEvent, field: usize) -> Option<AttributeValue> {
    if let Some(stream_event) = event.as_any().downcast_ref::<StreamEvent>() {
        stream_event.before_window_data.get(field).cloned()
    } else if let Some(grouped) = event.as_any().downcast_ref::<GroupedComplexEvent>() {
        raw_field(grouped.inner(), field)
    } else {
        None
    }
}

pub fn raw_number(event: &dyn ComplexEvent, field: usize) -> f64 {
    raw_field(event, field)
        .and_then(|v| v.to_number())
        .unwrap_or(0.0)
}

pub fn output_number(event: &dyn ComplexEvent, slot: usize) -> Option<f64> {
    event
        .get_output_data()
        .and_then(|data| data.get(slot))
        .and_then(|v| v.to_number())
}

pub fn group_key_of(event: &dyn ComplexEvent) -> Option<String> {
    event
        .as_any()
        .downcast_ref::<GroupedComplexEvent>()
        .map(|grouped| grouped.group_key().to_string())
}

/// Projects every raw stream field into the output slot area and records how
/// often it ran. Cloning the struct shares the counter with the test;
/// `clone_processor` creates an independent counter for the new partition.
#[derive(Debug, Clone)]
pub struct ProjectAllProcessor {
    invocations: Arc<AtomicUsize>,
}

impl ProjectAllProcessor {
    pub fn new() -> Self {
        ProjectAllProcessor {
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(AtomicOrdering::SeqCst)
    }
}

impl AttributeProcessor for ProjectAllProcessor {
    fn process(&self, event: &mut dyn ComplexEvent, _group_key: Option<&str>) {
        self.invocations.fetch_add(1, AtomicOrdering::SeqCst);
        if event.get_event_type() == ComplexEventType::Reset {
            return;
        }
        if let Some(stream_event) = event.as_any_mut().downcast_mut::<StreamEvent>() {
            stream_event.output_data = Some(stream_event.before_window_data.clone());
        }
    }

    fn clone_processor(&self, _key: &str) -> Box<dyn AttributeProcessor> {
        Box::new(ProjectAllProcessor::new())
    }
}

/// Running per-group sum over one raw field, written into an output slot.
/// A RESET event clears every accumulator. Ungrouped invocations accumulate
/// under the empty key.
#[derive(Debug, Clone)]
pub struct SumAggregator {
    field: usize,
    slot: usize,
    sums: Arc<Mutex<HashMap<String, f64>>>,
    invocations: Arc<AtomicUsize>,
}

impl SumAggregator {
    pub fn new(field: usize, slot: usize) -> Self {
        SumAggregator {
            field,
            slot,
            sums: Arc::new(Mutex::new(HashMap::new())),
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(AtomicOrdering::SeqCst)
    }

    pub fn sum_for(&self, group_key: &str) -> Option<f64> {
        self.sums.lock().unwrap().get(group_key).copied()
    }
}

impl AttributeProcessor for SumAggregator {
    fn process(&self, event: &mut dyn ComplexEvent, group_key: Option<&str>) {
        self.invocations.fetch_add(1, AtomicOrdering::SeqCst);
        if event.get_event_type() == ComplexEventType::Reset {
            self.sums.lock().unwrap().clear();
            return;
        }
        let key = group_key.unwrap_or("").to_string();
        let value = raw_number(event, self.field);
        let sum = {
            let mut sums = self.sums.lock().unwrap();
            let entry = sums.entry(key).or_insert(0.0);
            *entry += value;
            *entry
        };
        if let Some(stream_event) = event.as_any_mut().downcast_mut::<StreamEvent>() {
            let _ = stream_event.set_output_data_at_idx(AttributeValue::Double(sum), self.slot);
        }
    }

    fn clone_processor(&self, _key: &str) -> Box<dyn AttributeProcessor> {
        Box::new(SumAggregator::new(self.field, self.slot))
    }
}

/// Group key from the string form of one raw stream field.
#[derive(Debug)]
pub struct FieldKeyGenerator {
    field: usize,
}

impl FieldKeyGenerator {
    pub fn new(field: usize) -> Self {
        FieldKeyGenerator { field }
    }
}

impl GroupByKeyGenerator for FieldKeyGenerator {
    fn construct_event_key(&self, event: &dyn ComplexEvent) -> String {
        raw_field(event, self.field)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}

/// HAVING predicate: output slot value must be at least `min`.
#[derive(Debug)]
pub struct MinOutputHaving {
    slot: usize,
    min: f64,
}

impl MinOutputHaving {
    pub fn new(slot: usize, min: f64) -> Self {
        MinOutputHaving { slot, min }
    }
}

impl ConditionExecutor for MinOutputHaving {
    fn execute(&self, event: &dyn ComplexEvent) -> bool {
        output_number(event, self.slot).is_some_and(|value| value >= self.min)
    }
}

/// Orders events by one raw stream field.
#[derive(Debug)]
pub struct FieldOrderComparator {
    field: usize,
    ascending: bool,
}

impl FieldOrderComparator {
    pub fn ascending(field: usize) -> Self {
        FieldOrderComparator {
            field,
            ascending: true,
        }
    }

    pub fn descending(field: usize) -> Self {
        FieldOrderComparator {
            field,
            ascending: false,
        }
    }
}

impl OrderByEventComparator for FieldOrderComparator {
    fn compare(&self, a: &dyn ComplexEvent, b: &dyn ComplexEvent) -> Ordering {
        let ord = raw_number(a, self.field)
            .partial_cmp(&raw_number(b, self.field))
            .unwrap_or(Ordering::Equal);
        if self.ascending {
            ord
        } else {
            ord.reverse()
        }
    }
}

/// Rate limiter that keeps every delivered chunk for inspection.
#[derive(Debug, Clone)]
pub struct CollectingRateLimiter {
    chunks: Arc<Mutex<Vec<ComplexEventChunk>>>,
}

impl CollectingRateLimiter {
    pub fn new() -> Self {
        CollectingRateLimiter {
            chunks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.lock().unwrap().len()
    }

    pub fn take_chunks(&self) -> Vec<ComplexEventChunk> {
        std::mem::take(&mut *self.chunks.lock().unwrap())
    }

    pub fn total_events(&self) -> usize {
        self.chunks.lock().unwrap().iter().map(|c| c.len()).sum()
    }
}

impl OutputRateLimiter for CollectingRateLimiter {
    fn process(&self, chunk: ComplexEventChunk) {
        self.chunks.lock().unwrap().push(chunk);
    }
}
