//! Frame state machine.
//!
//! # State Machine
//!
//! ```text
//!            0x00                        payload byte (remaining > 1)
//!          ┌──────┐                            ┌──────┐
//!          │      ↓     length byte v != 0     │      ↓
//!        ┌──────────┐ ───────────────────> ┌──────────────┐
//!        │   Idle   │                      │   InFrame    │
//!        └──────────┘ <─────────────────── └──────────────┘
//!                        last payload byte
//!                      (checksum + gap emitted)
//! ```
//!
//! Each input byte produces exactly one [`Emission`]. The checksum is reset
//! when the length byte is consumed and folds the length byte and every
//! payload byte of the same frame, nothing else.

use std::num::NonZeroU8;

use bitframe_proto::{
    Fletcher16, SYMBOLS_PER_BYTE,
    wire::{FRAME_HEADER, HEADER_BURST_SYMBOLS, TRAILER_BURST_SYMBOLS},
};

use crate::buffer::SymbolBuffer;

/// Where the encoder is relative to frame boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FramePhase {
    /// Between frames. A zero byte is idle, anything else opens a frame.
    #[default]
    Idle,
    /// Inside a frame body.
    InFrame {
        /// Payload bytes still owed before the frame closes. Starts at the
        /// length byte's value, so it is never zero while in a frame.
        remaining: NonZeroU8,
    },
}

/// What one input byte turns into on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// An idle byte: eight idle symbols.
    Idle,
    /// A length byte opening a frame: the frame header, then the length.
    Open {
        /// The length byte
        length: u8,
    },
    /// A payload byte that leaves the frame open.
    Payload {
        /// The payload byte
        byte: u8,
    },
    /// The last payload byte, followed by the checksum and the idle gap.
    Close {
        /// The payload byte
        byte: u8,
        /// Checksum bytes in wire order
        checksum: [u8; 2],
    },
}

impl Emission {
    /// Symbols this emission writes.
    pub const fn symbol_len(&self) -> usize {
        match self {
            Self::Idle | Self::Payload { .. } => SYMBOLS_PER_BYTE,
            Self::Open { .. } => SYMBOLS_PER_BYTE + HEADER_BURST_SYMBOLS,
            Self::Close { .. } => SYMBOLS_PER_BYTE + TRAILER_BURST_SYMBOLS,
        }
    }

    /// Append the emission's symbols to `out`.
    pub fn write_to(&self, out: &mut SymbolBuffer) {
        match *self {
            Self::Idle => out.push_idle(),
            Self::Open { length } => {
                out.push_bytes(&FRAME_HEADER);
                out.push_byte(length);
            },
            Self::Payload { byte } => out.push_byte(byte),
            Self::Close { byte, checksum } => {
                out.push_byte(byte);
                out.push_bytes(&checksum);
                out.push_gap();
            },
        }
    }
}

/// Frame state carried between encoder calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameState {
    phase: FramePhase,
    checksum: Fletcher16,
}

impl FrameState {
    /// Idle state with a cleared checksum.
    pub const fn new() -> Self {
        Self { phase: FramePhase::Idle, checksum: Fletcher16::new() }
    }

    /// Current phase.
    pub const fn phase(&self) -> FramePhase {
        self.phase
    }

    /// True between frames.
    pub const fn is_idle(&self) -> bool {
        matches!(self.phase, FramePhase::Idle)
    }

    /// Payload bytes still owed by the open frame, `None` when idle.
    pub const fn remaining(&self) -> Option<u8> {
        match self.phase {
            FramePhase::Idle => None,
            FramePhase::InFrame { remaining } => Some(remaining.get()),
        }
    }

    /// Checksum accumulated over the current (or most recent) frame.
    pub const fn checksum(&self) -> Fletcher16 {
        self.checksum
    }

    /// Consume one input byte.
    pub fn step(&mut self, byte: u8) -> Emission {
        match self.phase {
            FramePhase::Idle => {
                let Some(length) = NonZeroU8::new(byte) else {
                    return Emission::Idle;
                };

                self.checksum.reset();
                self.checksum.fold(byte);
                self.phase = FramePhase::InFrame { remaining: length };
                Emission::Open { length: byte }
            },
            FramePhase::InFrame { remaining } => {
                self.checksum.fold(byte);

                if let Some(remaining) = NonZeroU8::new(remaining.get() - 1) {
                    self.phase = FramePhase::InFrame { remaining };
                    Emission::Payload { byte }
                } else {
                    self.phase = FramePhase::Idle;
                    Emission::Close { byte, checksum: self.checksum.bytes() }
                }
            },
        }
    }

    /// Symbols `input` would produce from this state.
    ///
    /// Runs the transitions on a copy; `self` is not modified.
    pub fn symbols_for(&self, input: &[u8]) -> usize {
        let mut probe = *self;
        input.iter().map(|&byte| probe.step(byte).symbol_len()).sum()
    }
}
