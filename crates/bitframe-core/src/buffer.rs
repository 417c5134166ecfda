//! Output symbol buffer.
//!
//! Append-only storage for raw symbol values (`0x00`, `0x01`, `0xFF`). Nothing
//! already written is ever overwritten; the only way to shrink the buffer is
//! to hand its contents off with [`SymbolBuffer::take`] or
//! [`SymbolBuffer::into_bytes`].
//!
//! Growth is fallible. The encoder reserves a whole call's worth of symbols
//! with [`SymbolBuffer::try_reserve`] before it writes anything, so the push
//! methods never reallocate inside the per-byte loop.

use bitframe_proto::{
    SYMBOLS_PER_BYTE, Symbol,
    symbol::{IDLE_SYMBOLS, byte_symbols},
    wire::GAP_BYTES,
};
use bytes::Bytes;

use crate::error::{EncoderError, Result};

/// Growable, append-only sequence of wire symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolBuffer {
    symbols: Vec<u8>,
}

impl SymbolBuffer {
    /// Empty buffer without an allocation.
    pub const fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Empty buffer with room for `capacity` symbols.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { symbols: Vec::with_capacity(capacity) }
    }

    /// Make room for at least `additional` more symbols.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.symbols
            .try_reserve(additional)
            .map_err(|source| EncoderError::Allocation { requested: additional, source })
    }

    /// Append the eight data symbols of `byte`, LSB first.
    pub fn push_byte(&mut self, byte: u8) {
        self.symbols.extend_from_slice(&byte_symbols(byte));
    }

    /// Append the data symbols of every byte in `bytes`.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push_byte(byte);
        }
    }

    /// Append one idle byte (eight idle symbols).
    pub fn push_idle(&mut self) {
        self.symbols.extend_from_slice(&IDLE_SYMBOLS);
    }

    /// Append `count` idle bytes.
    pub fn push_idle_bytes(&mut self, count: usize) {
        let len = self.symbols.len() + count * SYMBOLS_PER_BYTE;
        self.symbols.resize(len, Symbol::Idle.to_u8());
    }

    /// Append the inter-frame gap that follows every checksum.
    pub fn push_gap(&mut self) {
        self.push_idle_bytes(GAP_BYTES);
    }

    /// Symbols written.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols the buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.symbols.capacity()
    }

    /// Raw symbol values written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.symbols
    }

    /// Hand off everything written so far, leaving the buffer empty.
    pub fn take(&mut self) -> Bytes {
        Bytes::from(std::mem::take(&mut self.symbols))
    }

    /// Convert into an immutable, cheaply cloneable byte buffer.
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.symbols)
    }
}

impl AsRef<[u8]> for SymbolBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<SymbolBuffer> for Bytes {
    fn from(buffer: SymbolBuffer) -> Self {
        buffer.into_bytes()
    }
}
