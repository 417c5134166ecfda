//! Reference decoder.
//!
//! Reads a complete symbol stream back into idle bytes and frames. It is
//! strict: it expects exactly the layout the encoder produces and reports the
//! first deviation instead of resynchronising. Good enough to check the
//! encoder, not meant for a real receiver.

use bitframe_proto::{
    Fletcher16, SYMBOLS_PER_BYTE, Symbol,
    wire::{FRAME_HEADER, GAP_BYTES},
};
use thiserror::Error;
use tracing::trace;

/// Errors reported by [`ReferenceDecoder::decode`].
///
/// Offsets count logical bytes (groups of eight symbols) from the start of
/// the stream, except for [`DecodeError::InvalidSymbol`], which counts
/// symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A symbol outside the wire alphabet.
    #[error("invalid symbol {value:#04x} at symbol {offset}")]
    InvalidSymbol {
        /// Symbol index
        offset: usize,
        /// Raw value
        value: u8,
    },

    /// The stream length is not a multiple of eight symbols.
    #[error("stream ends with {trailing} symbols of an incomplete byte")]
    PartialByte {
        /// Leftover symbols
        trailing: usize,
    },

    /// A group of eight symbols mixes idle and data symbols.
    #[error("byte {offset} mixes idle and data symbols")]
    MixedByte {
        /// Byte index
        offset: usize,
    },

    /// Data appeared outside a frame without the frame header.
    #[error("byte {offset}: expected frame header")]
    BadHeader {
        /// Byte index
        offset: usize,
    },

    /// A length byte of zero after a valid header.
    #[error("byte {offset}: zero frame length")]
    ZeroLength {
        /// Byte index
        offset: usize,
    },

    /// An idle byte where frame data was expected.
    #[error("byte {offset}: idle inside frame")]
    UnexpectedIdle {
        /// Byte index
        offset: usize,
    },

    /// A data byte where the post-checksum gap was expected.
    #[error("byte {offset}: missing inter-frame gap")]
    MissingGap {
        /// Byte index
        offset: usize,
    },

    /// The stream ended inside a frame.
    #[error("stream ended inside a frame at byte {offset}")]
    Truncated {
        /// Byte index where more data was needed
        offset: usize,
    },
}

/// A frame read back from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Length byte
    pub length: u8,
    /// Payload bytes
    pub payload: Vec<u8>,
    /// Checksum bytes as received
    pub checksum: [u8; 2],
    /// Whether the received checksum matches the length and payload
    pub checksum_valid: bool,
}

/// One decoded unit of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEvent {
    /// An idle byte between frames.
    Idle,
    /// A complete frame, gap included.
    Frame(DecodedFrame),
}

/// One logical byte on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireByte {
    Idle,
    Data(u8),
}

/// Strict decoder for complete symbol streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceDecoder;

impl ReferenceDecoder {
    /// Decode a complete stream of raw symbols.
    pub fn decode(symbols: &[u8]) -> Result<Vec<DecodedEvent>, DecodeError> {
        let bytes = Self::group(symbols)?;
        let mut events = Vec::new();
        let mut cursor = Cursor { bytes: &bytes, pos: 0 };

        while let Some(byte) = cursor.peek() {
            match byte {
                WireByte::Idle => {
                    cursor.pos += 1;
                    events.push(DecodedEvent::Idle);
                },
                WireByte::Data(_) => {
                    let frame = Self::frame(&mut cursor)?;
                    trace!(length = frame.length, valid = frame.checksum_valid, "decoded frame");
                    events.push(DecodedEvent::Frame(frame));
                },
            }
        }

        Ok(events)
    }

    /// Decode and keep only the frames.
    pub fn frames(symbols: &[u8]) -> Result<Vec<DecodedFrame>, DecodeError> {
        Ok(Self::decode(symbols)?
            .into_iter()
            .filter_map(|event| match event {
                DecodedEvent::Frame(frame) => Some(frame),
                DecodedEvent::Idle => None,
            })
            .collect())
    }

    fn group(symbols: &[u8]) -> Result<Vec<WireByte>, DecodeError> {
        let trailing = symbols.len() % SYMBOLS_PER_BYTE;
        if trailing != 0 {
            return Err(DecodeError::PartialByte { trailing });
        }

        symbols
            .chunks_exact(SYMBOLS_PER_BYTE)
            .enumerate()
            .map(|(index, group)| Self::byte(index, group))
            .collect()
    }

    fn byte(index: usize, group: &[u8]) -> Result<WireByte, DecodeError> {
        let mut value = 0u8;
        let mut idle = 0;

        for (bit, &raw) in group.iter().enumerate() {
            let symbol = Symbol::try_from(raw).map_err(|_| DecodeError::InvalidSymbol {
                offset: index * SYMBOLS_PER_BYTE + bit,
                value: raw,
            })?;

            match symbol.bit() {
                Some(true) => value |= 1 << bit,
                Some(false) => {},
                None => idle += 1,
            }
        }

        match idle {
            0 => Ok(WireByte::Data(value)),
            SYMBOLS_PER_BYTE => Ok(WireByte::Idle),
            _ => Err(DecodeError::MixedByte { offset: index }),
        }
    }

    fn frame(cursor: &mut Cursor<'_>) -> Result<DecodedFrame, DecodeError> {
        let header_start = cursor.pos;
        for &expected in &FRAME_HEADER {
            if cursor.data()? != expected {
                return Err(DecodeError::BadHeader { offset: header_start });
            }
        }

        let length_offset = cursor.pos;
        let length = cursor.data()?;
        if length == 0 {
            return Err(DecodeError::ZeroLength { offset: length_offset });
        }

        let payload = (0..length).map(|_| cursor.data()).collect::<Result<Vec<_>, _>>()?;
        let checksum = [cursor.data()?, cursor.data()?];

        for _ in 0..GAP_BYTES {
            let offset = cursor.pos;
            match cursor.advance() {
                Some(WireByte::Idle) => {},
                Some(WireByte::Data(_)) => return Err(DecodeError::MissingGap { offset }),
                None => return Err(DecodeError::Truncated { offset }),
            }
        }

        let mut expected = Fletcher16::new();
        expected.fold(length);
        expected.fold_all(&payload);

        Ok(DecodedFrame {
            length,
            payload,
            checksum,
            checksum_valid: expected.bytes() == checksum,
        })
    }
}

struct Cursor<'a> {
    bytes: &'a [WireByte],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<WireByte> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<WireByte> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Next byte, which must be frame data.
    fn data(&mut self) -> Result<u8, DecodeError> {
        let offset = self.pos;
        match self.advance() {
            Some(WireByte::Data(value)) => Ok(value),
            Some(WireByte::Idle) => Err(DecodeError::UnexpectedIdle { offset }),
            None => Err(DecodeError::Truncated { offset }),
        }
    }
}
