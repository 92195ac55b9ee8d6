//! Fuzz target for the version-keyed string codecs
//!
//! # Strategy
//!
//! - Raw decode: arbitrary bytes under an arbitrary version tag
//! - Round trip: arbitrary text encoded then decoded under the same tag
//!
//! # Invariants
//!
//! - NEVER panic on malformed input
//! - Unknown tags fail both directions
//! - Anything that decodes re-encodes to the exact same bytes
//! - `decode(v, encode(v, s)) == s` for every known tag

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reflector_proto::{ProtocolVersion, codec_for, decode_string, encode_string};

#[derive(Debug, Arbitrary)]
enum FuzzInput {
    Decode { tag: u8, bytes: Vec<u8> },
    RoundTrip { tag: u8, text: String },
}

fuzz_target!(|input: FuzzInput| {
    match input {
        FuzzInput::Decode { tag, bytes } => {
            let version = ProtocolVersion::from_tag(tag);
            let known = codec_for(version).is_ok();

            if let Ok(text) = decode_string(version, &bytes) {
                assert!(known, "unknown tag {tag:#04x} decoded");
                let reencoded = encode_string(version, &text).expect("known tag encodes");
                assert_eq!(&reencoded[..], &bytes[..], "decode is not canonical");
            }
        },
        FuzzInput::RoundTrip { tag, text } => {
            let version = ProtocolVersion::from_tag(tag);

            match encode_string(version, &text) {
                Ok(bytes) => {
                    let decoded = decode_string(version, &bytes).expect("own output decodes");
                    assert_eq!(decoded, text);
                },
                Err(_) => assert!(codec_for(version).is_err()),
            }
        },
    }
});
