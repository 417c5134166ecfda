#![no_main]

use bitframe_core::FrameEncoder;
use bitframe_harness::ReferenceDecoder;
use bitframe_proto::FrameInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|payload: &[u8]| {
    let Ok(frame) = FrameInput::new(payload) else {
        return;
    };

    let mut encoder = FrameEncoder::new();
    let out = encoder.encode(&frame.to_bytes()).unwrap();
    let frames = ReferenceDecoder::frames(&out).unwrap();

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].payload, frame.payload());
    assert_eq!(frames[0].checksum, frame.expected_checksum());
    assert!(encoder.is_idle());
});
