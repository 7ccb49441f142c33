use crate::config::{HEADER_LEN, MAX_NAMESPACE_LEN};
use crate::error::{ProtocolError, Result};
use bytes::Bytes;
use std::fmt;

/// A namespaced message: channel name, routing key and opaque body.
///
/// Construction checks that both lengths fit their header fields, so every
/// `Message` can be framed apart from the overall frame size limit.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Message {
    namespace: String,
    key: u8,
    body: Bytes,
}

impl Message {
    pub fn new(namespace: impl Into<String>, key: u8, body: impl Into<Bytes>) -> Result<Self> {
        let namespace = namespace.into();
        let body = body.into();

        if namespace.len() > MAX_NAMESPACE_LEN {
            return Err(ProtocolError::NamespaceTooLong(namespace.len()));
        }
        if u32::try_from(body.len()).is_err() {
            return Err(ProtocolError::BodyTooLong(body.len()));
        }

        Ok(Self {
            namespace,
            key,
            body,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> u8 {
        self.key
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Encoded frame size in bytes, header included.
    pub fn frame_size(&self) -> usize {
        HEADER_LEN + self.namespace.len() + self.body.len()
    }

    pub fn into_parts(self) -> (String, u8, Bytes) {
        (self.namespace, self.key, self.body)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("namespace", &self.namespace)
            .field("key", &self.key)
            .field("body_len", &self.body.len())
            .finish()
    }
}
