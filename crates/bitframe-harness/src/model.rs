//! Reference model encoder.
//!
//! Renders a whole input in one pass with no state carried between calls:
//! the input is first cut into segments (idle bytes and frames), then each
//! segment is rendered from its logical wire bytes. Model-based tests compare
//! the streaming encoder, fed the same input in arbitrary chunks, against
//! this.

use bitframe_proto::{
    FrameInput, SYMBOLS_PER_BYTE, Symbol,
    wire::{FRAME_HEADER, GAP_BYTES},
};

const IDLE_SYMBOL: u8 = Symbol::Idle.to_u8();
const GAP_SYMBOLS: usize = GAP_BYTES * SYMBOLS_PER_BYTE;

/// One unit of encoder input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A zero byte between frames.
    Idle,
    /// A length byte and all of its payload.
    Frame(FrameInput),
    /// A frame cut short by the end of the input.
    Partial {
        /// Length byte
        length: u8,
        /// Payload bytes seen so far, fewer than `length`
        payload: Vec<u8>,
    },
}

/// Whole-input reference encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelEncoder;

impl ModelEncoder {
    /// Cut `input` into idle bytes and frames.
    pub fn segments(input: &[u8]) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut pos = 0;

        while let Some(&length) = input.get(pos) {
            if length == 0 {
                segments.push(Segment::Idle);
                pos += 1;
                continue;
            }

            let start = pos + 1;
            let end = (start + usize::from(length)).min(input.len());
            let body = &input[start..end];
            let complete = body.len() == usize::from(length);

            segments.push(match FrameInput::try_from(body) {
                Ok(frame) if complete => Segment::Frame(frame),
                _ => Segment::Partial { length, payload: body.to_vec() },
            });
            pos = end;
        }

        segments
    }

    /// Symbols the streaming encoder must produce for `input`.
    pub fn encode(input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        for segment in Self::segments(input) {
            match segment {
                Segment::Idle => out.extend([IDLE_SYMBOL; SYMBOLS_PER_BYTE]),
                Segment::Frame(frame) => {
                    frame.wire_bytes().iter().for_each(|&byte| expand(byte, &mut out));
                    out.extend([IDLE_SYMBOL; GAP_SYMBOLS]);
                },
                Segment::Partial { length, payload } => {
                    FRAME_HEADER.iter().for_each(|&byte| expand(byte, &mut out));
                    expand(length, &mut out);
                    payload.iter().for_each(|&byte| expand(byte, &mut out));
                },
            }
        }
        out
    }

    /// Frames `input` describes completely, in order.
    pub fn frames(input: &[u8]) -> Vec<FrameInput> {
        Self::segments(input)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Frame(frame) => Some(frame),
                Segment::Idle | Segment::Partial { .. } => None,
            })
            .collect()
    }
}

fn expand(byte: u8, out: &mut Vec<u8>) {
    out.extend((0..SYMBOLS_PER_BYTE).map(|bit| (byte >> bit) & 1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_idle_and_frames() {
        let segments = ModelEncoder::segments(&[0, 2, 0, 0, 0, 1, 9]);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], Segment::Idle);
        assert!(matches!(&segments[1], Segment::Frame(f) if f.payload() == [0, 0]));
        assert_eq!(segments[2], Segment::Idle);
        assert!(matches!(&segments[3], Segment::Frame(f) if f.payload() == [9]));
    }

    #[test]
    fn trailing_frame_is_partial() {
        let segments = ModelEncoder::segments(&[4, 1, 2]);
        assert_eq!(segments, vec![Segment::Partial { length: 4, payload: vec![1, 2] }]);
    }

    #[test]
    fn length_without_payload_is_partial() {
        let segments = ModelEncoder::segments(&[7]);
        assert_eq!(segments, vec![Segment::Partial { length: 7, payload: Vec::new() }]);
        assert_eq!(ModelEncoder::encode(&[7]).len(), 88);
    }

    #[test]
    fn idle_run() {
        assert_eq!(ModelEncoder::encode(&[0; 5]), vec![0xFF; 40]);
    }

    #[test]
    fn frame_size() {
        let out = ModelEncoder::encode(&[3, 0x41, 0x42, 0x43]);
        assert_eq!(out.len(), (10 + 1 + 3 + 2 + 2) * 8);
        assert!(out[out.len() - 16..].iter().all(|&s| s == 0xFF));
    }

    #[test]
    fn frame_layout_follows_wire_constants() {
        let frame = FrameInput::new(vec![0x5A]).unwrap();
        let out = ModelEncoder::encode(&frame.to_bytes());

        let body = frame.wire_bytes().len() * SYMBOLS_PER_BYTE;
        assert_eq!(out.len(), body + GAP_SYMBOLS);
        assert!(out[body..].iter().all(|&s| s == Symbol::Idle.to_u8()));
        assert!(out[..body].iter().all(|&s| s != Symbol::Idle.to_u8()));
    }
}
