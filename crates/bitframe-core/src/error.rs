//! Encoder error types.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors surfaced by the encoder.
///
/// No input byte is ever rejected. The only runtime failure is running out of
/// room for output, which is fatal for the call: nothing is written and the
/// frame state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    /// The output buffer could not grow to hold the call's symbols.
    #[error("failed to reserve {requested} output symbols")]
    Allocation {
        /// Symbols the call needed
        requested: usize,
        /// Allocator failure
        #[source]
        source: TryReserveError,
    },

    /// The call would produce more symbols than the configured limit.
    #[error("call needs {requested} output symbols, limit is {limit}")]
    OutputLimit {
        /// Symbols the call needed
        requested: usize,
        /// Configured per-call limit
        limit: usize,
    },

    /// Rejected configuration.
    #[error("invalid encoder config: {0}")]
    InvalidConfig(String),
}

/// Result alias for encoder operations.
pub type Result<T> = std::result::Result<T, EncoderError>;
