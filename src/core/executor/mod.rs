// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/mod.rs
pub mod condition_executor;

pub use condition_executor::ConditionExecutor;
