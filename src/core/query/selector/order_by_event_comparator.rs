// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/order_by_event_comparator.rs
use crate::core::event::complex_event::ComplexEvent;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Total order over events for ORDER BY.
///
/// Applied either to the raw input sequence or to the collapsed per-group
/// result set, never both. The sort the selector performs is stable.
pub trait OrderByEventComparator: Debug + Send + Sync {
    fn compare(&self, a: &dyn ComplexEvent, b: &dyn ComplexEvent) -> Ordering;
}
