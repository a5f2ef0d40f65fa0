//! Property tests for the escape codec

use proptest::prelude::*;
use serial9_protocol::{encode, encode_into, Decoded, Decoder, DecoderState, FrameValue};

#[test]
fn every_frame_value_roundtrips() {
    for raw in 0..=0x1FFu16 {
        let frame = FrameValue::new(raw);
        let mut decoder = Decoder::new();
        let mut decoded = None;

        for &byte in encode(frame).iter() {
            assert_eq!(decoded, None, "frame {raw:#05x} decoded early");
            decoded = decoder.feed(byte);
        }

        assert_eq!(decoded, Some(Decoded::Frame(frame)), "frame {raw:#05x}");
        assert_eq!(decoder.state(), DecoderState::Idle);
    }
}

#[test]
fn encoded_length_matches_frame_class() {
    for data in 0..=u8::MAX {
        let low = encode(FrameValue::low(data));
        let expected = if data == 0xFF { 2 } else { 1 };
        assert_eq!(low.len(), expected);

        let high = encode(FrameValue::high(data));
        assert_eq!(high.as_slice(), &[0xFF, 0x01, data]);
    }
}

proptest! {
    #[test]
    fn stream_roundtrip(raw in proptest::collection::vec(0u16..0x200, 0..64)) {
        let frames: Vec<FrameValue> = raw.iter().map(|&r| FrameValue::new(r)).collect();
        let mut buffer = [0u8; 64 * 3];
        let len = encode_into(frames.iter().copied(), &mut buffer).unwrap();

        let mut decoder = Decoder::new();
        let decoded: Vec<Decoded> = buffer[..len]
            .iter()
            .filter_map(|&b| decoder.feed(b))
            .collect();
        let expected: Vec<Decoded> = frames.into_iter().map(Decoded::Frame).collect();

        prop_assert_eq!(decoded, expected);
        prop_assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn control_byte_always_ends_escape(
        prefix in proptest::collection::vec(any::<u8>(), 0..32),
        control in any::<u8>(),
    ) {
        let mut decoder = Decoder::new();
        for byte in prefix {
            decoder.feed(byte);
        }

        // From Idle an escape code starts a sequence; otherwise it completes one
        let before = decoder.state();
        decoder.feed(0xFF);
        if before == DecoderState::Idle {
            prop_assert_eq!(decoder.state(), DecoderState::Escape);
            let out = decoder.feed(control);
            match out {
                None => prop_assert_eq!(decoder.state(), DecoderState::High),
                Some(_) => prop_assert_eq!(decoder.state(), DecoderState::Idle),
            }
        } else {
            prop_assert_eq!(decoder.state(), DecoderState::Idle);
        }
    }
}
