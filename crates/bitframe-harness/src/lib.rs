//! Test harness for the bitframe encoder.
//!
//! Reference implementations to check the streaming encoder against: a
//! decoder that reads the symbol stream back into idle bytes and frames, a
//! model encoder that renders a whole input at once without any cross-call
//! state, and helpers that split an input into chunks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chunking;
pub mod decoder;
pub mod model;

pub use chunking::{ChunkedInput, encode_chunked, partition};
pub use decoder::{DecodeError, DecodedEvent, DecodedFrame, ReferenceDecoder};
pub use model::{ModelEncoder, Segment};
