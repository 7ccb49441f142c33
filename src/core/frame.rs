//! Message <-> frame conversion.
//!
//! Decoding is two-phase: the caller reads the 16-byte header, sizes the
//! second read with [`peek_payload_len`](crate::core::header::peek_payload_len),
//! then hands both buffers to [`decode`]. Neither buffer is modified.

use crate::config::{BodyLengthPolicy, MAX_FRAME_SIZE};
use crate::core::header::FrameHeader;
use crate::core::message::Message;
use crate::error::{Malformed, ProtocolError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

/// Encode a message into a freshly allocated frame.
pub fn encode(message: &Message) -> Result<Vec<u8>> {
    let size = checked_frame_size(message, MAX_FRAME_SIZE)?;
    let mut out = Vec::with_capacity(size);
    write_frame(message, &mut out);
    Ok(out)
}

/// Append the frame for `message` to `dst`, reserving exactly its size.
pub fn encode_into(message: &Message, dst: &mut BytesMut) -> Result<()> {
    let size = checked_frame_size(message, MAX_FRAME_SIZE)?;
    dst.reserve(size);
    write_frame(message, dst);
    Ok(())
}

/// Decode a frame from its header and remainder under the strict policy.
pub fn decode(header: &[u8], remainder: &[u8]) -> Result<Message> {
    decode_with(header, remainder, BodyLengthPolicy::Strict)
}

/// Decode a frame, choosing how the declared body length is enforced.
pub fn decode_with(header: &[u8], remainder: &[u8], policy: BodyLengthPolicy) -> Result<Message> {
    let header = FrameHeader::parse(header)?;
    let (namespace, body) = split_payload(&header, remainder, policy)?;
    build_message(&header, namespace, Bytes::copy_from_slice(body))
}

/// Decode from an owned remainder, slicing the body without a copy.
pub(crate) fn decode_payload(
    header: &FrameHeader,
    remainder: Bytes,
    policy: BodyLengthPolicy,
) -> Result<Message> {
    let (namespace, body) = split_payload(header, &remainder, policy)?;
    let body = remainder.slice_ref(body);
    build_message(header, namespace, body)
}

pub(crate) fn checked_frame_size(message: &Message, limit: usize) -> Result<usize> {
    let size = message.frame_size();
    if size > limit {
        return Err(ProtocolError::OversizedFrame(size));
    }
    Ok(size)
}

pub(crate) fn write_frame<B: BufMut>(message: &Message, dst: &mut B) {
    // Message::new bounds both lengths to their field widths
    let header = FrameHeader {
        key: message.key(),
        compression: 0,
        namespace_len: message.namespace().len() as u16,
        body_len: message.body().len() as u32,
    };
    header.write_to(dst);
    dst.put_slice(message.namespace().as_bytes());
    dst.put_slice(message.body());
}

fn split_payload<'a>(
    header: &FrameHeader,
    remainder: &'a [u8],
    policy: BodyLengthPolicy,
) -> Result<(&'a [u8], &'a [u8])> {
    let namespace_len = header.namespace_len as usize;
    if namespace_len > remainder.len() {
        return Err(Malformed::NamespaceOutOfBounds {
            declared: namespace_len,
            available: remainder.len(),
        }
        .into());
    }

    let (namespace, body) = remainder.split_at(namespace_len);
    let declared = header.body_len as usize;
    if body.len() != declared {
        match policy {
            BodyLengthPolicy::Strict => {
                return Err(Malformed::BodyLengthMismatch {
                    declared,
                    actual: body.len(),
                }
                .into());
            }
            BodyLengthPolicy::Lenient => {
                debug!(
                    declared,
                    actual = body.len(),
                    "Body length disagrees with header, using remainder"
                );
            }
        }
    }

    Ok((namespace, body))
}

fn build_message(header: &FrameHeader, namespace: &[u8], body: Bytes) -> Result<Message> {
    let namespace = std::str::from_utf8(namespace).map_err(|_| Malformed::NamespaceEncoding)?;
    Message::new(namespace, header.key, body)
}
