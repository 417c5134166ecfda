//! Fixed wire constants.
//!
//! Sizes are given in logical bytes unless the name says symbols. One logical
//! byte is always [`SYMBOLS_PER_BYTE`] symbols on the wire.

use crate::symbol::SYMBOLS_PER_BYTE;

/// Alternating preamble that precedes every frame.
pub const PREAMBLE: [u8; 6] = [0xA5, 0xF0, 0xA5, 0xF0, 0xA5, 0xF0];

/// Start-of-frame marker, sent right after the preamble.
pub const START_OF_FRAME: [u8; 4] = [0x7E, 0x81, 0xC3, 0x3C];

/// Preamble followed by start-of-frame, emitted verbatim before every length
/// byte.
pub const FRAME_HEADER: [u8; 10] = [0xA5, 0xF0, 0xA5, 0xF0, 0xA5, 0xF0, 0x7E, 0x81, 0xC3, 0x3C];

/// Input byte that marks an idle period outside a frame.
pub const IDLE_BYTE: u8 = 0x00;

/// Idle bytes inserted after every checksum.
pub const GAP_BYTES: usize = 2;

/// Checksum bytes closing every frame.
pub const CHECKSUM_BYTES: usize = 2;

/// Largest payload a single length byte can announce.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

/// Extra symbols emitted, on top of the baseline, when a length byte opens a
/// frame.
pub const HEADER_BURST_SYMBOLS: usize = FRAME_HEADER.len() * SYMBOLS_PER_BYTE;

/// Extra symbols emitted, on top of the baseline, when the last payload byte
/// closes a frame.
pub const TRAILER_BURST_SYMBOLS: usize = (CHECKSUM_BYTES + GAP_BYTES) * SYMBOLS_PER_BYTE;

/// Logical bytes a frame adds around its payload: header, length, checksum
/// and gap.
pub const fn frame_overhead_bytes() -> usize {
    FRAME_HEADER.len() + 1 + CHECKSUM_BYTES + GAP_BYTES
}

/// Symbols a complete frame with `payload_len` payload bytes occupies on the
/// wire, gap included.
pub const fn frame_symbols(payload_len: usize) -> usize {
    (frame_overhead_bytes() + payload_len) * SYMBOLS_PER_BYTE
}
