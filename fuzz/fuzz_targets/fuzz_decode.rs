#![no_main]

use libfuzzer_sys::fuzz_target;
use nsframe::{decode, decode_with, BodyLengthPolicy, HEADER_LEN};

fuzz_target!(|data: &[u8]| {
    // Split arbitrary input into header and remainder; decode must never panic
    let split = data.len().min(HEADER_LEN);
    let (header, remainder) = data.split_at(split);
    let _ = decode(header, remainder);
    let _ = decode_with(header, remainder, BodyLengthPolicy::Lenient);
});
