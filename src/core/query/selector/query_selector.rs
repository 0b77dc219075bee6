// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/query_selector.rs
use super::attribute::AttributeProcessor;
use super::group_by_key_generator::GroupByKeyGenerator;
use super::order_by_event_comparator::OrderByEventComparator;
use crate::core::error::QueryCreationError;
use crate::core::event::complex_event::{ComplexEvent, ComplexEventType};
use crate::core::event::complex_event_chunk::ComplexEventChunk;
use crate::core::event::grouped_complex_event::GroupedComplexEvent;
use crate::core::event::state::populater::{SkipStateEventPopulator, StateEventPopulator};
use crate::core::executor::condition_executor::ConditionExecutor;
use crate::core::query::output::rate_limiter::OutputRateLimiter;

use indexmap::IndexMap;
use log::{debug, trace};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex};

/// Orchestrator for the selection portion of a query.
///
/// Per input chunk it picks one of four processing strategies from
/// `(is_batch && batching_enabled, group-by configured, aggregator present)`,
/// drives the per-event pipeline (state population, attribute processors,
/// HAVING), applies ORDER BY and LIMIT, and hands the result to the output
/// rate limiter. Configuration is fixed at build time; only the rate limiter
/// is assigned later, exactly once.
#[derive(Debug)]
pub struct QuerySelector {
    id: String,
    current_on: bool,
    expired_on: bool,
    contains_aggregator: bool,
    batching_enabled: bool,
    limit: Option<u64>,
    attribute_processors: Vec<Box<dyn AttributeProcessor>>,
    group_by_key_generator: Option<Arc<dyn GroupByKeyGenerator>>,
    order_by_event_comparator: Option<Arc<dyn OrderByEventComparator>>,
    having_condition_executor: Option<Arc<dyn ConditionExecutor>>,
    event_populator: Arc<dyn StateEventPopulator>,
    output_rate_limiter: OnceCell<Arc<dyn OutputRateLimiter>>,
    // Serializes the scan/filter pipeline: attribute processors carry shared
    // aggregation state and the limit counter is call-scoped.
    scan_lock: Mutex<()>,
    // Held across delivery so chunks reach the rate limiter in the order
    // their critical sections completed.
    emit_lock: Mutex<()>,
}

impl QuerySelector {
    pub fn builder(
        id: impl Into<String>,
        current_on: bool,
        expired_on: bool,
    ) -> QuerySelectorBuilder {
        QuerySelectorBuilder::new(id, current_on, expired_on)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_group_by(&self) -> bool {
        self.group_by_key_generator.is_some()
    }

    pub fn is_order_by(&self) -> bool {
        self.order_by_event_comparator.is_some()
    }

    pub fn contains_aggregator(&self) -> bool {
        self.contains_aggregator
    }

    pub fn batching_enabled(&self) -> bool {
        self.batching_enabled
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Assign the downstream rate limiter. Settable exactly once; a second
    /// attempt is a configuration error.
    pub fn set_output_rate_limiter(
        &self,
        rate_limiter: Arc<dyn OutputRateLimiter>,
    ) -> Result<(), QueryCreationError> {
        self.output_rate_limiter.set(rate_limiter).map_err(|_| {
            QueryCreationError::OutputRateLimiterAlreadyAssigned {
                selector_id: self.id.clone(),
            }
        })
    }

    /// Process a chunk and forward the result to the output rate limiter.
    ///
    /// Delivery happens outside the scan critical section but preserves the
    /// order in which chunks completed it.
    pub fn process(&self, chunk: ComplexEventChunk) {
        trace!("chunk processed by selector '{}'", self.id);
        let Some(rate_limiter) = self.output_rate_limiter.get().map(Arc::clone) else {
            debug!(
                "selector '{}' has no output rate limiter assigned, dropping chunk",
                self.id
            );
            return;
        };
        let scan = self.scan_lock.lock().unwrap();
        let output = self.select(chunk);
        let emit = self.emit_lock.lock().unwrap();
        drop(scan);
        if let Some(output) = output {
            rate_limiter.process(output);
        }
        drop(emit);
    }

    /// Process a chunk and return the result to the caller, for selectors
    /// whose output feeds another in-process computation instead of the rate
    /// limiter. `None` means the chunk filtered down to nothing.
    pub fn execute(&self, chunk: ComplexEventChunk) -> Option<ComplexEventChunk> {
        trace!("chunk executed by selector '{}'", self.id);
        let _scan = self.scan_lock.lock().unwrap();
        self.select(chunk)
    }

    fn select(&self, chunk: ComplexEventChunk) -> Option<ComplexEventChunk> {
        if chunk.is_batch() && self.batching_enabled {
            if self.is_group_by() {
                self.process_in_batch_group_by(chunk)
            } else if self.contains_aggregator {
                self.process_in_batch_no_group_by(chunk)
            } else {
                self.process_no_group_by(chunk)
            }
        } else if self.is_group_by() {
            self.process_group_by(chunk)
        } else {
            self.process_no_group_by(chunk)
        }
    }

    /// Standard strategy: filter the chunk in place.
    fn process_no_group_by(&self, mut chunk: ComplexEventChunk) -> Option<ComplexEventChunk> {
        if let Some(comparator) = &self.order_by_event_comparator {
            order_event_chunk(&mut chunk, comparator.as_ref());
        }
        chunk.reset();
        let mut limit_count: u64 = 0;
        loop {
            let remove = match chunk.next() {
                None => break,
                Some(event) => match event.get_event_type() {
                    ComplexEventType::Current | ComplexEventType::Expired => {
                        self.event_populator.populate_state_event(event);
                        for processor in &self.attribute_processors {
                            processor.process(event, None);
                        }
                        if !self.survives(event) {
                            true
                        } else if self.limit.is_some_and(|limit| limit_count >= limit) {
                            // LIMIT truncates but never stops the scan; the
                            // processors above already ran for this event.
                            true
                        } else {
                            limit_count += 1;
                            false
                        }
                    }
                    ComplexEventType::Reset => {
                        for processor in &self.attribute_processors {
                            processor.process(event, None);
                        }
                        true
                    }
                    ComplexEventType::Timer => true,
                },
            };
            if remove {
                chunk.remove();
            }
        }
        chunk.reset();
        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }

    /// Group-by strategy for non-batch chunks: surviving events move into a
    /// fresh chunk as [`GroupedComplexEvent`]s, one per surviving input event.
    fn process_group_by(&self, mut chunk: ComplexEventChunk) -> Option<ComplexEventChunk> {
        let Some(key_generator) = self.group_by_key_generator.as_ref().map(Arc::clone) else {
            return self.process_no_group_by(chunk);
        };
        if let Some(comparator) = &self.order_by_event_comparator {
            order_event_chunk(&mut chunk, comparator.as_ref());
        }
        chunk.reset();
        let mut out = ComplexEventChunk::new(chunk.is_batch());
        let mut limit_count: u64 = 0;
        loop {
            let take_key = match chunk.next() {
                None => break,
                Some(event) => match event.get_event_type() {
                    ComplexEventType::Current | ComplexEventType::Expired => {
                        self.event_populator.populate_state_event(event);
                        let group_key = key_generator.construct_event_key(event);
                        for processor in &self.attribute_processors {
                            processor.process(event, Some(&group_key));
                        }
                        if self.survives(event)
                            && !self.limit.is_some_and(|limit| limit_count >= limit)
                        {
                            Some(group_key)
                        } else {
                            None
                        }
                    }
                    ComplexEventType::Reset => {
                        for processor in &self.attribute_processors {
                            processor.process(event, None);
                        }
                        None
                    }
                    ComplexEventType::Timer => None,
                },
            };
            if let Some(group_key) = take_key {
                if let Some(event) = chunk.remove() {
                    out.add(Box::new(GroupedComplexEvent::new(group_key, event)));
                    limit_count += 1;
                }
            }
        }
        out.reset();
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    /// Batch collapse without grouping: the whole chunk is one completed
    /// batch and an aggregator is present, so only the last surviving event
    /// carries the meaningful aggregate value.
    fn process_in_batch_no_group_by(
        &self,
        mut chunk: ComplexEventChunk,
    ) -> Option<ComplexEventChunk> {
        chunk.reset();
        let mut last_event: Option<Box<dyn ComplexEvent>> = None;
        loop {
            let take = match chunk.next() {
                None => break,
                Some(event) => match event.get_event_type() {
                    ComplexEventType::Current | ComplexEventType::Expired => {
                        self.event_populator.populate_state_event(event);
                        for processor in &self.attribute_processors {
                            processor.process(event, None);
                        }
                        self.survives(event)
                    }
                    ComplexEventType::Reset => {
                        for processor in &self.attribute_processors {
                            processor.process(event, None);
                        }
                        false
                    }
                    ComplexEventType::Timer => false,
                },
            };
            if take {
                if let Some(event) = chunk.remove() {
                    last_event = Some(event);
                }
            }
        }
        let last_event = last_event?;
        chunk.clear();
        // LIMIT 0 still ran every processor above; only emission is cut.
        if self.limit.map_or(true, |limit| limit > 0) {
            chunk.add(last_event);
        }
        chunk.reset();
        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }

    /// Batch collapse with grouping: only the final per-group state survives
    /// the batch, in first-seen-key order unless ORDER BY reorders it.
    fn process_in_batch_group_by(&self, mut chunk: ComplexEventChunk) -> Option<ComplexEventChunk> {
        let Some(key_generator) = self.group_by_key_generator.as_ref().map(Arc::clone) else {
            return self.process_no_group_by(chunk);
        };
        chunk.reset();
        let mut grouped_events: IndexMap<String, Box<dyn ComplexEvent>> = IndexMap::new();
        loop {
            let take_key = match chunk.next() {
                None => break,
                Some(event) => match event.get_event_type() {
                    ComplexEventType::Current | ComplexEventType::Expired => {
                        self.event_populator.populate_state_event(event);
                        let group_key = key_generator.construct_event_key(event);
                        for processor in &self.attribute_processors {
                            processor.process(event, Some(&group_key));
                        }
                        if self.survives(event) {
                            Some(group_key)
                        } else {
                            None
                        }
                    }
                    ComplexEventType::Reset => {
                        for processor in &self.attribute_processors {
                            processor.process(event, None);
                        }
                        None
                    }
                    ComplexEventType::Timer => None,
                },
            };
            if let Some(group_key) = take_key {
                if let Some(event) = chunk.remove() {
                    // Last writer wins; the entry keeps its first-seen position.
                    grouped_events.insert(group_key, event);
                }
            }
        }
        if grouped_events.is_empty() {
            return None;
        }
        chunk.clear();
        if let Some(comparator) = &self.order_by_event_comparator {
            self.populate_ordered_events_in_batch_group_by(
                &mut chunk,
                grouped_events,
                comparator.as_ref(),
            );
        } else {
            self.populate_events_in_batch_group_by(&mut chunk, grouped_events);
        }
        chunk.reset();
        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }

    fn populate_events_in_batch_group_by(
        &self,
        chunk: &mut ComplexEventChunk,
        grouped_events: IndexMap<String, Box<dyn ComplexEvent>>,
    ) {
        let mut limit_count: u64 = 0;
        for (group_key, event) in grouped_events {
            if self.limit.is_some_and(|limit| limit_count >= limit) {
                break;
            }
            chunk.add(Box::new(GroupedComplexEvent::new(group_key, event)));
            limit_count += 1;
        }
    }

    fn populate_ordered_events_in_batch_group_by(
        &self,
        chunk: &mut ComplexEventChunk,
        grouped_events: IndexMap<String, Box<dyn ComplexEvent>>,
        comparator: &dyn OrderByEventComparator,
    ) {
        let mut events: Vec<GroupedComplexEvent> = grouped_events
            .into_iter()
            .map(|(group_key, event)| GroupedComplexEvent::new(group_key, event))
            .collect();
        events.sort_by(|a, b| comparator.compare(a, b));
        let mut limit_count: u64 = 0;
        for event in events {
            if self.limit.is_some_and(|limit| limit_count >= limit) {
                break;
            }
            chunk.add(Box::new(event));
            limit_count += 1;
        }
    }

    /// Survival rule shared by every strategy: the event kind must match an
    /// enabled output side and the having predicate (if any) must pass. Only
    /// evaluated after all attribute processors ran for the event.
    fn survives(&self, event: &dyn ComplexEvent) -> bool {
        let side_enabled = match event.get_event_type() {
            ComplexEventType::Current => self.current_on,
            ComplexEventType::Expired => self.expired_on,
            ComplexEventType::Timer | ComplexEventType::Reset => false,
        };
        side_enabled
            && self
                .having_condition_executor
                .as_ref()
                .map_or(true, |having| having.execute(event))
    }

    /// Independent copy of this selector for the given partition key.
    ///
    /// Attribute processors are cloned through their own partition factories
    /// (they may hold per-partition state); stateless collaborators are
    /// shared. The output rate limiter is not carried over and must be
    /// assigned on the clone.
    pub fn clone_for_partition(&self, key: &str) -> QuerySelector {
        QuerySelector {
            id: format!("{}{}", self.id, key),
            current_on: self.current_on,
            expired_on: self.expired_on,
            contains_aggregator: self.contains_aggregator,
            batching_enabled: self.batching_enabled,
            limit: self.limit,
            attribute_processors: self
                .attribute_processors
                .iter()
                .map(|processor| processor.clone_processor(key))
                .collect(),
            group_by_key_generator: self.group_by_key_generator.clone(),
            order_by_event_comparator: self.order_by_event_comparator.clone(),
            having_condition_executor: self.having_condition_executor.clone(),
            event_populator: Arc::clone(&self.event_populator),
            output_rate_limiter: OnceCell::new(),
            scan_lock: Mutex::new(()),
            emit_lock: Mutex::new(()),
        }
    }
}

/// Sort every event of the chunk by the comparator, preserving the chunk's
/// batch flag. Used as the pre-pass of the non-collapsing strategies.
fn order_event_chunk(chunk: &mut ComplexEventChunk, comparator: &dyn OrderByEventComparator) {
    let mut events = chunk.drain();
    events.sort_by(|a, b| comparator.compare(a.as_ref(), b.as_ref()));
    for event in events {
        chunk.add(event);
    }
}

/// Builder producing an immutable [`QuerySelector`].
pub struct QuerySelectorBuilder {
    id: String,
    current_on: bool,
    expired_on: bool,
    contains_aggregator: bool,
    attribute_processors: Vec<Box<dyn AttributeProcessor>>,
    group_by_key_generator: Option<Arc<dyn GroupByKeyGenerator>>,
    order_by_event_comparator: Option<Arc<dyn OrderByEventComparator>>,
    having_condition_executor: Option<Arc<dyn ConditionExecutor>>,
    batching_enabled: bool,
    limit: Option<u64>,
    event_populator: Arc<dyn StateEventPopulator>,
}

impl QuerySelectorBuilder {
    pub fn new(id: impl Into<String>, current_on: bool, expired_on: bool) -> Self {
        QuerySelectorBuilder {
            id: id.into(),
            current_on,
            expired_on,
            contains_aggregator: false,
            attribute_processors: Vec::new(),
            group_by_key_generator: None,
            order_by_event_comparator: None,
            having_condition_executor: None,
            batching_enabled: true,
            limit: None,
            event_populator: Arc::new(SkipStateEventPopulator),
        }
    }

    /// Set the ordered projection/aggregation steps. `contains_aggregator`
    /// marks whether any of them accumulates state across events.
    pub fn attribute_processors(
        mut self,
        processors: Vec<Box<dyn AttributeProcessor>>,
        contains_aggregator: bool,
    ) -> Self {
        self.attribute_processors = processors;
        self.contains_aggregator = self.contains_aggregator || contains_aggregator;
        self
    }

    pub fn group_by(mut self, key_generator: Arc<dyn GroupByKeyGenerator>) -> Self {
        self.group_by_key_generator = Some(key_generator);
        self
    }

    pub fn order_by(mut self, comparator: Arc<dyn OrderByEventComparator>) -> Self {
        self.order_by_event_comparator = Some(comparator);
        self
    }

    /// Set the HAVING predicate. `contains_aggregator` marks whether the
    /// predicate itself reads aggregated state.
    pub fn having(mut self, executor: Arc<dyn ConditionExecutor>, contains_aggregator: bool) -> Self {
        self.having_condition_executor = Some(executor);
        self.contains_aggregator = self.contains_aggregator || contains_aggregator;
        self
    }

    pub fn batching_enabled(mut self, batching_enabled: bool) -> Self {
        self.batching_enabled = batching_enabled;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn event_populator(mut self, event_populator: Arc<dyn StateEventPopulator>) -> Self {
        self.event_populator = event_populator;
        self
    }

    pub fn build(self) -> QuerySelector {
        QuerySelector {
            id: self.id,
            current_on: self.current_on,
            expired_on: self.expired_on,
            contains_aggregator: self.contains_aggregator,
            batching_enabled: self.batching_enabled,
            limit: self.limit,
            attribute_processors: self.attribute_processors,
            group_by_key_generator: self.group_by_key_generator,
            order_by_event_comparator: self.order_by_event_comparator,
            having_condition_executor: self.having_condition_executor,
            event_populator: self.event_populator,
            output_rate_limiter: OnceCell::new(),
            scan_lock: Mutex::new(()),
            emit_lock: Mutex::new(()),
        }
    }
}

impl std::fmt::Debug for QuerySelectorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySelectorBuilder")
            .field("id", &self.id)
            .field("current_on", &self.current_on)
            .field("expired_on", &self.expired_on)
            .field("contains_aggregator", &self.contains_aggregator)
            .field("is_group_by", &self.group_by_key_generator.is_some())
            .field("is_order_by", &self.order_by_event_comparator.is_some())
            .field("batching_enabled", &self.batching_enabled)
            .field("limit", &self.limit)
            .finish()
    }
}
