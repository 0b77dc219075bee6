// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/mod.rs
pub mod error;
pub mod event;
pub mod executor;
pub mod query;
