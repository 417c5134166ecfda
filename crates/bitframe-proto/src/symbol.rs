//! Symbol alphabet and bit serializer.
//!
//! Serialization is least-significant bit first. Decoders depend on this
//! order, so it never changes.

use crate::errors::ProtocolError;

/// Symbols per logical byte. Also the rate multiplier a host scheduler
/// applies between input bytes and output symbols.
pub const SYMBOLS_PER_BYTE: usize = 8;

/// One symbol of the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Symbol {
    /// A transmitted 0 bit
    Zero = 0x00,
    /// A transmitted 1 bit
    One = 0x01,
    /// Nothing is being transmitted
    Idle = 0xFF,
}

impl Symbol {
    /// Raw wire value.
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Data symbol for a single bit.
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Self::One } else { Self::Zero }
    }

    /// Bit carried by this symbol, `None` for idle.
    pub const fn bit(self) -> Option<bool> {
        match self {
            Self::Zero => Some(false),
            Self::One => Some(true),
            Self::Idle => None,
        }
    }
}

impl From<Symbol> for u8 {
    fn from(symbol: Symbol) -> Self {
        symbol.to_u8()
    }
}

impl TryFrom<u8> for Symbol {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Zero),
            0x01 => Ok(Self::One),
            0xFF => Ok(Self::Idle),
            other => Err(ProtocolError::InvalidSymbol(other)),
        }
    }
}

/// Expand one byte into eight data symbols, LSB first.
pub const fn serialize_byte(byte: u8) -> [Symbol; SYMBOLS_PER_BYTE] {
    let mut out = [Symbol::Zero; SYMBOLS_PER_BYTE];
    let mut i = 0;
    while i < SYMBOLS_PER_BYTE {
        out[i] = Symbol::from_bit((byte >> i) & 1 == 1);
        i += 1;
    }
    out
}

/// Eight idle symbols, the expansion of one idle byte.
pub const fn serialize_idle() -> [Symbol; SYMBOLS_PER_BYTE] {
    [Symbol::Idle; SYMBOLS_PER_BYTE]
}

/// Raw symbol values for `byte`, LSB first.
///
/// Same mapping as [`serialize_byte`], in the `u8` form output buffers store.
pub const fn byte_symbols(byte: u8) -> [u8; SYMBOLS_PER_BYTE] {
    let mut out = [0u8; SYMBOLS_PER_BYTE];
    let mut i = 0;
    while i < SYMBOLS_PER_BYTE {
        out[i] = (byte >> i) & 1;
        i += 1;
    }
    out
}

/// Raw symbol values for one idle byte.
pub const IDLE_SYMBOLS: [u8; SYMBOLS_PER_BYTE] = [Symbol::Idle.to_u8(); SYMBOLS_PER_BYTE];
