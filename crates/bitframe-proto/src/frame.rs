//! Building encoder input for a single frame.
//!
//! The encoder itself accepts any byte stream. Producers that start from a
//! payload use [`FrameInput`] to get the `[len] + payload` form, and tests use
//! it to compute what the frame will look like on the wire.

use crate::{
    checksum::Fletcher16,
    errors::{ProtocolError, Result},
    wire::{FRAME_HEADER, MAX_PAYLOAD_LEN},
};

/// A validated frame payload of 1 to 255 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInput {
    payload: Vec<u8>,
}

impl FrameInput {
    /// Validate `payload` as a frame body.
    pub fn new(payload: impl Into<Vec<u8>>) -> Result<Self> {
        let payload = payload.into();
        if payload.is_empty() {
            return Err(ProtocolError::EmptyPayload);
        }
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(ProtocolError::PayloadTooLarge { len: payload.len() });
        }
        Ok(Self { payload })
    }

    /// Value of the length byte.
    pub fn length(&self) -> u8 {
        // Bounded to 1..=255 by `new`
        self.payload.len() as u8
    }

    /// Payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Encoder input for this frame: the length byte, then the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload.len() + 1);
        out.push(self.length());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Checksum bytes the encoder emits when this frame closes.
    pub fn expected_checksum(&self) -> [u8; 2] {
        let mut acc = Fletcher16::new();
        acc.fold(self.length());
        acc.fold_all(&self.payload);
        acc.bytes()
    }

    /// Logical bytes of the frame on the wire: header, length, payload,
    /// checksum. The idle gap after the checksum is not data and is left out.
    pub fn wire_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FRAME_HEADER.len() + self.payload.len() + 3);
        out.extend_from_slice(&FRAME_HEADER);
        out.push(self.length());
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&self.expected_checksum());
        out
    }
}

impl TryFrom<&[u8]> for FrameInput {
    type Error = ProtocolError;

    fn try_from(payload: &[u8]) -> Result<Self> {
        Self::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn rejects_empty_payload() {
        assert_eq!(FrameInput::new(Vec::new()), Err(ProtocolError::EmptyPayload));
    }

    #[test]
    fn rejects_oversized_payload() {
        let result = FrameInput::new(vec![0u8; 256]);
        assert_eq!(result, Err(ProtocolError::PayloadTooLarge { len: 256 }));
    }

    #[test]
    fn accepts_bounds() {
        assert_eq!(FrameInput::new(vec![7]).map(|f| f.length()), Ok(1));
        assert_eq!(FrameInput::new(vec![7; 255]).map(|f| f.length()), Ok(255));
    }

    #[test]
    fn input_and_wire_forms() {
        let frame = FrameInput::try_from(&b"ABC"[..]).unwrap();

        assert_eq!(frame.to_bytes(), hex!("03 41 42 43"));
        assert_eq!(frame.expected_checksum(), hex!("C9 97"));
        assert_eq!(frame.wire_bytes(), hex!("A5 F0 A5 F0 A5 F0 7E 81 C3 3C 03 41 42 43 C9 97"));
    }

    #[test]
    fn zero_bytes_are_payload() {
        let frame = FrameInput::new(vec![0, 0]).unwrap();
        assert_eq!(frame.to_bytes(), [2, 0, 0]);
        // sum1 = 2, 2, 2; sum2 = 2, 4, 6
        assert_eq!(frame.expected_checksum(), [2, 6]);
    }
}
