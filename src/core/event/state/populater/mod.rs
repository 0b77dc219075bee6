// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/state/populater/mod.rs
pub mod skip_state_event_populator;
pub mod state_event_populator;

pub use skip_state_event_populator::SkipStateEventPopulator;
pub use state_event_populator::StateEventPopulator;
