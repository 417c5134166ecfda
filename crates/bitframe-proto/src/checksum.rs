//! Fletcher-16 frame checksum.
//!
//! Two running sums over the length byte and the payload: the first is the
//! sum of the bytes, the second the sum of the first. Both stay reduced
//! modulo 255 after every fold, so the accumulator never overflows however
//! long a frame is.

const MODULUS: u16 = 255;

/// Running Fletcher-16 accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fletcher16 {
    sum1: u16,
    sum2: u16,
}

impl Fletcher16 {
    /// Accumulator at `(0, 0)`.
    pub const fn new() -> Self {
        Self { sum1: 0, sum2: 0 }
    }

    /// Checksum bytes of `data`, folded in order from a fresh accumulator.
    pub fn of(data: &[u8]) -> [u8; 2] {
        let mut acc = Self::new();
        acc.fold_all(data);
        acc.bytes()
    }

    /// Back to `(0, 0)`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Fold one byte into both sums.
    pub fn fold(&mut self, byte: u8) {
        self.sum1 = (self.sum1 + u16::from(byte)) % MODULUS;
        self.sum2 = (self.sum2 + self.sum1) % MODULUS;
    }

    /// Fold every byte of `data`, in order.
    pub fn fold_all(&mut self, data: &[u8]) {
        for &byte in data {
            self.fold(byte);
        }
    }

    /// First sum, already reduced.
    pub const fn sum1(&self) -> u8 {
        self.sum1 as u8
    }

    /// Second sum, already reduced.
    pub const fn sum2(&self) -> u8 {
        self.sum2 as u8
    }

    /// Checksum bytes in wire order: `sum1`, then `sum2`.
    pub const fn bytes(&self) -> [u8; 2] {
        [self.sum1(), self.sum2()]
    }
}
