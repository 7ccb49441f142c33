//! # nsframe
//!
//! Fixed-layout binary framing for namespaced messages.
//!
//! A [`Message`] carries a UTF-8 namespace, a one-byte routing key and an
//! opaque body. It travels as a 16-byte big-endian header followed by the
//! namespace bytes and then the body bytes.
//!
//! ## Reading frames
//! Transports read in two steps: the fixed header, then exactly
//! [`peek_payload_len`] more bytes, and pass both buffers to [`decode`].
//! [`MessageCodec`] does the same over a `BytesMut` for `tokio_util` framed
//! streams.
//!
//! ```rust
//! use nsframe::{decode, encode, peek_payload_len, Message, HEADER_LEN};
//!
//! let msg = Message::new("alerts", 0x07, vec![1, 2, 3]).unwrap();
//! let frame = encode(&msg).unwrap();
//!
//! let header: [u8; HEADER_LEN] = frame[..HEADER_LEN].try_into().unwrap();
//! let remainder = &frame[HEADER_LEN..HEADER_LEN + peek_payload_len(&header)];
//! assert_eq!(decode(&header, remainder).unwrap(), msg);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use config::{
    BodyLengthPolicy, CodecConfig, FrameConfig, HEADER_LEN, MAGIC_BYTES, MAX_FRAME_SIZE,
    PROTOCOL_VERSION,
};
pub use crate::core::codec::MessageCodec;
pub use crate::core::frame::{decode, decode_with, encode, encode_into};
pub use crate::core::header::{peek_body_len, peek_namespace_len, peek_payload_len, FrameHeader};
pub use crate::core::message::Message;
pub use error::{Malformed, ProtocolError, Result};
