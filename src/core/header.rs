//! Fixed 16-byte frame header.
//!
//! ```text
//!  0      1      2        3     4 .. 7     8       9     10..11   12..15
//! [Magic(2)   ] [Version] [Key] [Rsvd(4)] [Compr] [Rsvd] [NsLen] [BodyLen]
//! ```
//!
//! The `peek_*` accessors read a single length field without validating the
//! rest of the header. Transports use them to size the second read.

use crate::config::{HEADER_LEN, MAGIC_BYTES, PROTOCOL_VERSION};
use crate::error::{Malformed, Result};
use bytes::BufMut;

const KEY_OFFSET: usize = 3;
const COMPRESSION_OFFSET: usize = 8;
const NAMESPACE_LEN_OFFSET: usize = 10;
const BODY_LEN_OFFSET: usize = 12;

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub key: u8,
    /// Compression indicator. Carried through, never interpreted.
    pub compression: u8,
    pub namespace_len: u16,
    pub body_len: u32,
}

impl FrameHeader {
    /// Parse and validate a header.
    ///
    /// Length, magic and version are checked in that order before any field
    /// is read.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let header: &[u8; HEADER_LEN] = bytes
            .try_into()
            .map_err(|_| Malformed::HeaderLength(bytes.len()))?;

        let magic = [header[0], header[1]];
        if magic != MAGIC_BYTES {
            return Err(Malformed::Magic(magic).into());
        }
        if header[2] != PROTOCOL_VERSION {
            return Err(Malformed::Version(header[2]).into());
        }

        Ok(Self {
            key: header[KEY_OFFSET],
            compression: header[COMPRESSION_OFFSET],
            namespace_len: peek_namespace_len(header),
            body_len: peek_body_len(header),
        })
    }

    /// Namespace plus body length, the size of the second read.
    ///
    /// Saturates at `usize::MAX` where the sum does not fit, which is always
    /// above any frame size limit.
    #[inline]
    pub fn payload_len(&self) -> usize {
        payload_len(self.namespace_len, self.body_len)
    }

    /// Full frame length, header included. Saturating like `payload_len`.
    #[inline]
    pub fn frame_len(&self) -> usize {
        HEADER_LEN.saturating_add(self.payload_len())
    }

    /// Serialize to the wire layout. Reserved bytes are written as zero.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..2].copy_from_slice(&MAGIC_BYTES);
        out[2] = PROTOCOL_VERSION;
        out[KEY_OFFSET] = self.key;
        out[COMPRESSION_OFFSET] = self.compression;
        out[NAMESPACE_LEN_OFFSET..BODY_LEN_OFFSET]
            .copy_from_slice(&self.namespace_len.to_be_bytes());
        out[BODY_LEN_OFFSET..HEADER_LEN].copy_from_slice(&self.body_len.to_be_bytes());
        out
    }

    /// Append the serialized header to `dst`.
    pub fn write_to<B: BufMut>(&self, dst: &mut B) {
        dst.put_slice(&self.to_bytes());
    }
}

/// Namespace length field (bytes 10..12, big-endian).
#[inline]
pub fn peek_namespace_len(header: &[u8; HEADER_LEN]) -> u16 {
    u16::from_be_bytes([header[NAMESPACE_LEN_OFFSET], header[NAMESPACE_LEN_OFFSET + 1]])
}

/// Body length field (bytes 12..16, big-endian).
#[inline]
pub fn peek_body_len(header: &[u8; HEADER_LEN]) -> u32 {
    u32::from_be_bytes([
        header[BODY_LEN_OFFSET],
        header[BODY_LEN_OFFSET + 1],
        header[BODY_LEN_OFFSET + 2],
        header[BODY_LEN_OFFSET + 3],
    ])
}

/// Bytes the transport must read after the header.
#[inline]
pub fn peek_payload_len(header: &[u8; HEADER_LEN]) -> usize {
    payload_len(peek_namespace_len(header), peek_body_len(header))
}

fn payload_len(namespace_len: u16, body_len: u32) -> usize {
    let total = u64::from(namespace_len) + u64::from(body_len);
    usize::try_from(total).unwrap_or(usize::MAX)
}
