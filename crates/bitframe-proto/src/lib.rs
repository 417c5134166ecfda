//! Wire format for the bitframe symbol stream.
//!
//! The encoder turns a byte stream into a stream of three-valued symbols:
//! bit-zero, bit-one, and idle. Every logical byte on the wire becomes eight
//! symbols, least-significant bit first. A frame on the wire looks like:
//!
//! ```text
//! A5 F0 A5 F0 A5 F0 | 7E 81 C3 3C | LEN | payload[LEN] | CK1 CK2 | idle idle
//! └──── preamble ───┘ └─── SOF ───┘                     └ Fletcher ┘ └─ gap ─┘
//! ```
//!
//! This crate holds only the vocabulary shared by the encoder and anything
//! that reads its output: the symbol alphabet, the fixed constants, the bit
//! serializer, and the Fletcher checksum. The stateful encoder lives in
//! `bitframe-core`.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod checksum;
pub mod errors;
pub mod frame;
pub mod symbol;
pub mod wire;

pub use checksum::Fletcher16;
pub use errors::{ProtocolError, Result};
pub use frame::FrameInput;
pub use symbol::{SYMBOLS_PER_BYTE, Symbol, serialize_byte, serialize_idle};
