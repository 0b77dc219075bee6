// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/state/mod.rs
pub mod populater;

pub use populater::{SkipStateEventPopulator, StateEventPopulator};
