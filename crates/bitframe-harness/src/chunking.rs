//! Splitting input into chunks the way a host scheduler might.

use arbitrary::Arbitrary;
use bitframe_core::{EncoderError, FrameEncoder, SymbolBuffer};

/// An input stream plus where to cut it.
///
/// Cut points are taken modulo the input length, so any value is usable;
/// duplicates and zero are ignored. Derives [`Arbitrary`] so fuzz targets can
/// build one straight from raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub struct ChunkedInput {
    /// Bytes fed to the encoder
    pub input: Vec<u8>,
    /// Requested chunk boundaries
    pub cuts: Vec<usize>,
}

impl ChunkedInput {
    /// Nonempty chunks covering the input in order.
    pub fn chunks(&self) -> Vec<&[u8]> {
        partition(&self.input, &self.cuts)
    }
}

/// Split `input` into nonempty chunks at `cuts`.
///
/// Concatenating the result always gives back `input`. An empty input
/// produces no chunks.
pub fn partition<'a>(input: &'a [u8], cuts: &[usize]) -> Vec<&'a [u8]> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut points: Vec<usize> =
        cuts.iter().map(|cut| cut % input.len()).filter(|&cut| cut != 0).collect();
    points.sort_unstable();
    points.dedup();

    let mut chunks = Vec::with_capacity(points.len() + 1);
    let mut start = 0;
    for point in points {
        chunks.push(&input[start..point]);
        start = point;
    }
    chunks.push(&input[start..]);
    chunks
}

/// Feed `chunks` to `encoder` one call at a time and concatenate the output.
pub fn encode_chunked(
    encoder: &mut FrameEncoder,
    chunks: &[&[u8]],
) -> Result<Vec<u8>, EncoderError> {
    let mut out = SymbolBuffer::new();
    for chunk in chunks {
        encoder.encode_into(chunk, &mut out)?;
    }
    Ok(out.as_slice().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_covers_input() {
        let input = [1, 2, 3, 4, 5];
        let chunks = partition(&input, &[3, 1, 3, 0, 5]);

        assert_eq!(chunks, vec![&[1][..], &[2, 3][..], &[4, 5][..]]);
        assert_eq!(chunks.concat(), input);
    }

    #[test]
    fn no_cuts_is_one_chunk() {
        let input = [9, 9];
        assert_eq!(partition(&input, &[]), vec![&input[..]]);
    }

    #[test]
    fn empty_input_has_no_chunks() {
        assert!(partition(&[], &[1, 2]).is_empty());
    }

    #[test]
    fn chunked_input_uses_cuts() {
        let chunked = ChunkedInput { input: vec![0, 1, 2, 3], cuts: vec![2] };
        assert_eq!(chunked.chunks(), vec![&[0, 1][..], &[2, 3][..]]);
    }
}
