// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/output/rate_limiter.rs
use crate::core::event::complex_event_chunk::ComplexEventChunk;
use std::fmt::Debug;

/// Downstream sink receiving the final result chunk of a selection pass.
///
/// The selector never calls this with an empty chunk; a chunk filtered down
/// to nothing simply produces no call.
pub trait OutputRateLimiter: Debug + Send + Sync {
    fn process(&self, chunk: ComplexEventChunk);
}
