// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/error/mod.rs

/// Errors raised while wiring a query selector together.
///
/// These are fatal at setup time; the selector has no recoverable runtime
/// error class of its own (a chunk filtered down to nothing is a normal
/// outcome, not an error).
#[derive(Debug, thiserror::Error)]
pub enum QueryCreationError {
    #[error("output rate limiter is already assigned to selector '{selector_id}'")]
    OutputRateLimiterAlreadyAssigned { selector_id: String },
}
