#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use nsframe::MessageCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Drain as many frames as the stream codec will produce from raw bytes
    let mut codec = MessageCodec::default();
    let mut buf = BytesMut::from(data);
    while let Ok(Some(_)) = codec.decode(&mut buf) {}
});
