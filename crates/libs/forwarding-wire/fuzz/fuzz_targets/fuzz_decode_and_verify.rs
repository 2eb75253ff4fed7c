//! Fuzz target for forwarding payload decoding.
//!
//! ```bash
//! cd crates/libs/forwarding-wire
//! cargo +nightly fuzz run fuzz_decode_and_verify
//! ```

#![no_main]

use forwarding_wire::{decode_and_verify, ForwardingError};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    secret: String,
    payload: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    // Must never panic, whatever the bytes.
    let result = decode_and_verify(&input.payload, &input.secret);

    let again = decode_and_verify(&input.payload, &input.secret);
    assert_eq!(result, again);

    if input.payload.len() < forwarding_wire::SIGNATURE_LEN {
        assert_eq!(result, Err(ForwardingError::Truncated));
    }
});
