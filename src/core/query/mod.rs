// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/mod.rs
pub mod output;
pub mod selector;
