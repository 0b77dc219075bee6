// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/mod.rs
pub mod stream_event;

pub use stream_event::StreamEvent;
