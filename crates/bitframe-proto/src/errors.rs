//! Protocol error types.

use thiserror::Error;

/// Errors raised while interpreting wire values or building frame input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A raw value outside the `{0x00, 0x01, 0xFF}` symbol alphabet.
    #[error("invalid symbol value: {0:#04x}")]
    InvalidSymbol(u8),

    /// Frames carry at least one payload byte; a zero length byte means idle.
    #[error("frame payload must not be empty")]
    EmptyPayload,

    /// The length byte cannot describe more than 255 payload bytes.
    #[error("frame payload too large: {len} bytes (max 255)")]
    PayloadTooLarge {
        /// Length of the rejected payload
        len: usize,
    },
}

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
