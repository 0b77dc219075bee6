// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/output/mod.rs
pub mod rate_limiter;

pub use rate_limiter::OutputRateLimiter;
