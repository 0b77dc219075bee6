// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/condition_executor.rs
use crate::core::event::complex_event::ComplexEvent;
use std::fmt::Debug;

/// Boolean predicate over a fully populated event.
///
/// Used for HAVING: the selector evaluates it only after every attribute
/// processor has run, so the predicate sees projected/aggregated state.
pub trait ConditionExecutor: Debug + Send + Sync {
    fn execute(&self, event: &dyn ComplexEvent) -> bool;
}
