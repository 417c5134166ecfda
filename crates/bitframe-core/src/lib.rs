//! bitframe encoder core
//!
//! Pure, synchronous stream transform from framed bytes to wire symbols. The
//! host pipeline owns scheduling and hands the encoder chunks of input of any
//! size; the encoder returns exactly the symbols for each chunk and carries
//! its frame state to the next call.
//!
//! # Architecture
//!
//! The per-byte decision is a pure transition on [`FrameState`] that returns
//! a declarative [`Emission`]. The [`FrameEncoder`] sizes the output for the
//! whole chunk up front, then writes each emission into a [`SymbolBuffer`].
//! Because the state is a small `Copy` value, sizing is a dry run over a copy
//! and a refused call leaves the encoder exactly where it was.
//!
//! # Components
//!
//! - [`state`]: Frame state machine and checksum accumulation
//! - [`buffer`]: Append-only output symbol buffer
//! - [`encoder`]: The streaming encoder
//! - [`config`]: Encoder configuration
//! - [`error`]: Encoder error types

pub mod buffer;
pub mod config;
pub mod encoder;
pub mod error;
pub mod state;

pub use buffer::SymbolBuffer;
pub use config::EncoderConfig;
pub use encoder::{EncoderStats, FrameEncoder};
pub use error::EncoderError;
pub use state::{Emission, FramePhase, FrameState};
