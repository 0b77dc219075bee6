// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming query-selection engine.
//!
//! Given a chunk of events produced by upstream stream operators, a
//! [`QuerySelector`](core::query::selector::QuerySelector) applies projection,
//! optional grouping, optional HAVING filtering, optional ordering, optional
//! row limiting and optional batch collapsing, then hands the resulting chunk
//! to a downstream rate limiter. Projection steps, key generators, predicates,
//! comparators and the output consumer are supplied by the caller through the
//! trait seams in [`crate::core`].

pub mod core;

pub use crate::core::error::QueryCreationError;
pub use crate::core::event::complex_event::{ComplexEvent, ComplexEventType};
pub use crate::core::event::complex_event_chunk::ComplexEventChunk;
pub use crate::core::event::grouped_complex_event::GroupedComplexEvent;
pub use crate::core::event::stream::StreamEvent;
pub use crate::core::event::value::AttributeValue;
pub use crate::core::query::selector::{QuerySelector, QuerySelectorBuilder};
