// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/mod.rs
pub mod attribute;
pub mod group_by_key_generator;
pub mod order_by_event_comparator;
pub mod query_selector;

pub use attribute::AttributeProcessor;
pub use group_by_key_generator::GroupByKeyGenerator;
pub use order_by_event_comparator::OrderByEventComparator;
pub use query_selector::{QuerySelector, QuerySelectorBuilder};
