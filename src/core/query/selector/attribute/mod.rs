// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/mod.rs
pub mod attribute_processor;

pub use attribute_processor::AttributeProcessor;
