//! Encoder configuration.

use crate::error::{EncoderError, Result};

/// Encoder configuration
///
/// There is nothing to tune about the wire format; the knobs only bound how
/// the encoder uses memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncoderConfig {
    /// Refuse any call that would produce more symbols than this. `None`
    /// means unbounded.
    pub max_symbols_per_call: Option<usize>,
    /// Symbols to reserve beyond the exact requirement when [`encode`]
    /// allocates a fresh buffer. Lets a host that appends more data to the
    /// returned buffer avoid a second allocation.
    ///
    /// [`encode`]: crate::FrameEncoder::encode
    pub initial_capacity: usize,
}

impl EncoderConfig {
    /// Check the configuration for values that can never work.
    pub fn validate(&self) -> Result<()> {
        if self.max_symbols_per_call == Some(0) {
            return Err(EncoderError::InvalidConfig(
                "max_symbols_per_call must be at least 1".to_string(),
            ));
        }
        if self.initial_capacity > MAX_CAPACITY {
            return Err(EncoderError::InvalidConfig(format!(
                "initial_capacity must be at most {MAX_CAPACITY}"
            )));
        }
        Ok(())
    }
}

/// Largest buffer a `Vec<u8>` can hold.
const MAX_CAPACITY: usize = isize::MAX.unsigned_abs();
