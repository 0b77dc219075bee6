// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/mod.rs
pub mod complex_event;
pub mod complex_event_chunk;
pub mod grouped_complex_event;
pub mod state;
pub mod stream;
pub mod value;

pub use complex_event::{ComplexEvent, ComplexEventType};
pub use complex_event_chunk::ComplexEventChunk;
pub use grouped_complex_event::GroupedComplexEvent;
pub use value::AttributeValue;
