#![no_main]

use bitframe_core::FrameEncoder;
use bitframe_harness::{ChunkedInput, ModelEncoder, encode_chunked};
use libfuzzer_sys::fuzz_target;

// Any input, cut anywhere, must encode exactly like the whole-input model.
fuzz_target!(|data: ChunkedInput| {
    let mut encoder = FrameEncoder::new();
    let streamed = encode_chunked(&mut encoder, &data.chunks()).unwrap();

    assert_eq!(streamed, ModelEncoder::encode(&data.input));
    assert_eq!(encoder.stats().bytes_consumed, data.input.len() as u64);
});
