//! Streaming frame encoder.
//!
//! The host calls [`FrameEncoder::encode`] (or [`FrameEncoder::encode_into`])
//! once per input chunk, with chunks of any size. Each call returns exactly
//! the symbols for that chunk. A frame may be split anywhere across calls and
//! still encodes identically to the unsplit stream.
//!
//! A call is all-or-nothing: output for the whole chunk is sized and reserved
//! before the first byte is consumed. If that fails the call returns an error
//! and the frame state is exactly what it was before the call.

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::{
    buffer::SymbolBuffer,
    config::EncoderConfig,
    error::{EncoderError, Result},
    state::{Emission, FrameState},
};

/// Counters accumulated over the encoder's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderStats {
    /// Input bytes consumed
    pub bytes_consumed: u64,
    /// Symbols written
    pub symbols_emitted: u64,
    /// Length bytes seen (frames started)
    pub frames_opened: u64,
    /// Frames whose checksum and gap were written
    pub frames_closed: u64,
    /// Zero bytes consumed between frames
    pub idle_bytes: u64,
}

/// Byte-to-symbol frame encoder.
///
/// Owns the frame state for one stream. Independent streams use independent
/// encoders. The encoder does no locking; the host must give it exclusive,
/// ordered access.
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    state: FrameState,
    config: EncoderConfig,
    stats: EncoderStats,
}

impl FrameEncoder {
    /// Encoder in the idle state with the default configuration.
    pub fn new() -> Self {
        Self::build(EncoderConfig::default())
    }

    /// Encoder in the idle state with a custom configuration.
    pub fn with_config(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EncoderConfig) -> Self {
        debug!(
            max_symbols_per_call = ?config.max_symbols_per_call,
            initial_capacity = config.initial_capacity,
            "frame encoder created"
        );
        Self { state: FrameState::new(), config, stats: EncoderStats::default() }
    }

    /// Current frame state.
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// True between frames.
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    /// Active configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Lifetime counters.
    pub fn stats(&self) -> EncoderStats {
        self.stats
    }

    /// Exact number of symbols encoding `input` would produce right now.
    ///
    /// Does not change the encoder. Hosts use this to size downstream
    /// buffers before calling [`FrameEncoder::encode_into`].
    pub fn encoded_len(&self, input: &[u8]) -> usize {
        self.state.symbols_for(input)
    }

    /// Encode one chunk of input and return its symbols.
    pub fn encode(&mut self, input: &[u8]) -> Result<Bytes> {
        let mut out = SymbolBuffer::new();
        self.encode_with_headroom(input, &mut out, self.config.initial_capacity)?;
        Ok(out.into_bytes())
    }

    /// Encode one chunk of input, appending its symbols to `out`.
    ///
    /// Returns the number of symbols appended. Symbols already in `out` are
    /// left as they are.
    pub fn encode_into(&mut self, input: &[u8], out: &mut SymbolBuffer) -> Result<usize> {
        self.encode_with_headroom(input, out, 0)
    }

    /// Drop any partially encoded frame and return to idle.
    ///
    /// Symbols already returned for the abandoned frame stay on the wire; the
    /// next nonzero byte starts a new frame. Lifetime counters are kept.
    pub fn reset(&mut self) {
        debug!(remaining = ?self.state.remaining(), "frame encoder reset");
        self.state = FrameState::new();
    }

    fn encode_with_headroom(
        &mut self,
        input: &[u8],
        out: &mut SymbolBuffer,
        headroom: usize,
    ) -> Result<usize> {
        let required = self.encoded_len(input);

        if let Some(limit) = self.config.max_symbols_per_call.filter(|&limit| required > limit) {
            warn!(required, limit, input_len = input.len(), "encode refused: output limit");
            return Err(EncoderError::OutputLimit { requested: required, limit });
        }

        out.try_reserve(required.saturating_add(headroom)).inspect_err(|err| {
            warn!(required, input_len = input.len(), %err, "encode refused: allocation failed");
        })?;

        let start = out.len();
        for &byte in input {
            let emission = self.state.step(byte);
            self.record(emission);
            emission.write_to(out);
        }

        let written = out.len() - start;
        debug_assert_eq!(written, required, "emission sizes disagree with dry run");

        self.stats.bytes_consumed += input.len() as u64;
        self.stats.symbols_emitted += written as u64;

        Ok(written)
    }

    fn record(&mut self, emission: Emission) {
        match emission {
            Emission::Idle => self.stats.idle_bytes += 1,
            Emission::Open { length } => {
                self.stats.frames_opened += 1;
                trace!(length, "frame opened");
            },
            Emission::Payload { .. } => {},
            Emission::Close { checksum, .. } => {
                self.stats.frames_closed += 1;
                trace!(ck1 = checksum[0], ck2 = checksum[1], "frame closed");
            },
        }
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use bitframe_proto::{FrameInput, wire::FRAME_HEADER};
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn expand(bytes: &[u8]) -> Vec<u8> {
        let mut out = SymbolBuffer::new();
        out.push_bytes(bytes);
        out.as_slice().to_vec()
    }

    #[test]
    fn idle_bytes_become_idle_symbols() {
        let mut encoder = FrameEncoder::new();
        let out = encoder.encode(&[0, 0, 0]).unwrap();

        assert_eq!(&out[..], &[0xFF; 24]);
        assert!(encoder.is_idle());
    }

    #[test]
    fn empty_chunk_produces_nothing() {
        let mut encoder = FrameEncoder::new();
        let out = encoder.encode(&[]).unwrap();

        assert!(out.is_empty());
        assert_eq!(encoder.stats(), EncoderStats::default());
    }

    #[test]
    fn single_frame_layout() {
        let mut encoder = FrameEncoder::new();
        let out = encoder.encode(&[3, 0x41, 0x42, 0x43]).unwrap();

        let mut expected = expand(&FRAME_HEADER);
        expected.extend(expand(&[3, 0x41, 0x42, 0x43, 0xC9, 0x97]));
        expected.extend([0xFF; 16]);

        assert_eq!(&out[..], &expected[..]);
        assert!(encoder.is_idle());
    }

    #[test]
    fn split_header_matches_whole() {
        let mut whole = FrameEncoder::new();
        let expected = whole.encode(&[3, 0x41, 0x42, 0x43]).unwrap();

        let mut split = FrameEncoder::new();
        let mut out = split.encode(&[3, 0x41]).unwrap().to_vec();
        out.extend_from_slice(&split.encode(&[0x42, 0x43]).unwrap());

        assert_eq!(out, expected.to_vec());
    }

    #[test]
    fn state_persists_between_calls() {
        let mut encoder = FrameEncoder::new();
        encoder.encode(&[4, 1]).unwrap();
        assert_eq!(encoder.state().remaining(), Some(3));

        let out = encoder.encode(&[2]).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(encoder.state().remaining(), Some(2));
    }

    #[test]
    fn encoded_len_matches_output() {
        let mut encoder = FrameEncoder::new();
        let input = [0, 2, 7, 7, 0, 0, 1];

        let predicted = encoder.encoded_len(&input);
        let out = encoder.encode(&input).unwrap();
        assert_eq!(predicted, out.len());
    }

    #[test]
    fn encode_into_appends() {
        let mut encoder = FrameEncoder::new();
        let mut out = SymbolBuffer::new();

        let first = encoder.encode_into(&[0], &mut out).unwrap();
        let second = encoder.encode_into(&[1, 0x80], &mut out).unwrap();

        assert_eq!(first, 8);
        assert_eq!(second, 88 + 40);
        assert_eq!(out.len(), first + second);
        assert_eq!(&out.as_slice()[..8], &[0xFF; 8]);
    }

    #[test]
    fn stats_track_frames() {
        let mut encoder = FrameEncoder::new();
        let frame = FrameInput::new(b"hi".to_vec()).unwrap();

        encoder.encode(&[0, 0]).unwrap();
        encoder.encode(&frame.to_bytes()).unwrap();
        encoder.encode(&[1]).unwrap();

        let stats = encoder.stats();
        assert_eq!(stats.bytes_consumed, 6);
        assert_eq!(stats.idle_bytes, 2);
        assert_eq!(stats.frames_opened, 2);
        assert_eq!(stats.frames_closed, 1);
        assert_eq!(stats.symbols_emitted, 16 + (88 + 8 + 40) + 88);
    }

    #[test]
    fn output_limit_leaves_state_untouched() {
        let config = EncoderConfig { max_symbols_per_call: Some(64), ..Default::default() };
        let mut encoder = FrameEncoder::with_config(config).unwrap();
        encoder.encode(&[0; 8]).unwrap();

        let result = encoder.encode(&[5, 1]);
        assert_eq!(result, Err(EncoderError::OutputLimit { requested: 96, limit: 64 }));
        assert!(encoder.is_idle());
        assert_eq!(encoder.stats().bytes_consumed, 8);
    }

    #[test]
    fn allocation_failure_leaves_state_untouched() {
        let config =
            EncoderConfig { initial_capacity: isize::MAX.unsigned_abs(), ..Default::default() };
        let mut encoder = FrameEncoder::with_config(config).unwrap();
        let before = encoder.stats();

        let result = encoder.encode(&[3, 1]);
        assert!(matches!(result, Err(EncoderError::Allocation { .. })));
        assert!(encoder.is_idle());
        assert_eq!(encoder.state(), &FrameState::new());
        assert_eq!(encoder.stats(), before);
    }

    #[test]
    fn new_logs_creation() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();

        let encoder = tracing::subscriber::with_default(subscriber, FrameEncoder::new);
        assert!(encoder.is_idle());
        assert!(logs.contents().contains("frame encoder created"));
    }

    #[test]
    fn new_matches_default_config() {
        let plain = FrameEncoder::new();
        let configured = FrameEncoder::with_config(EncoderConfig::default()).unwrap();
        assert_eq!(plain.config(), configured.config());
        assert_eq!(plain.state(), configured.state());
        assert_eq!(plain.stats(), configured.stats());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EncoderConfig { max_symbols_per_call: Some(0), ..Default::default() };
        assert!(matches!(FrameEncoder::with_config(config), Err(EncoderError::InvalidConfig(_))));
    }

    #[test]
    fn reset_abandons_partial_frame() {
        let mut encoder = FrameEncoder::new();
        encoder.encode(&[10, 1, 2]).unwrap();
        assert!(!encoder.is_idle());

        encoder.reset();
        assert!(encoder.is_idle());

        let out = encoder.encode(&[0]).unwrap();
        assert_eq!(&out[..], &[0xFF; 8]);
    }
}
