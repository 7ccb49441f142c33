//! Tokio codec for framing messages over byte streams.
//!
//! The decoder performs the two-phase read on a growing buffer: once 16
//! header bytes are present it validates them and learns the payload size,
//! then waits until the whole frame is buffered. Incomplete input is left
//! untouched.

use crate::config::{FrameConfig, HEADER_LEN, MAX_FRAME_SIZE};
use crate::core::frame::{checked_frame_size, decode_payload, write_frame};
use crate::core::header::FrameHeader;
use crate::core::message::Message;
use crate::error::{ProtocolError, Result};
use crate::utils::metrics::CodecMetrics;
use bytes::{Buf, BytesMut};
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct MessageCodec {
    config: FrameConfig,
    metrics: Arc<CodecMetrics>,
}

impl MessageCodec {
    pub fn new(config: FrameConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(CodecMetrics::new()),
        }
    }

    /// Report into an existing metrics collector.
    pub fn with_metrics(config: FrameConfig, metrics: Arc<CodecMetrics>) -> Self {
        Self { config, metrics }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<CodecMetrics> {
        &self.metrics
    }

    /// Effective frame size limit. Configuration can only lower the wire limit.
    pub fn max_frame_size(&self) -> usize {
        self.config.max_frame_size.min(MAX_FRAME_SIZE)
    }

    fn reject(&self, err: ProtocolError) -> ProtocolError {
        match &err {
            ProtocolError::MalformedFrame(reason) => {
                self.metrics.malformed_frame();
                warn!(%reason, "Rejected malformed frame");
            }
            ProtocolError::OversizedFrame(size) => {
                self.metrics.oversized_frame();
                warn!(size, limit = self.max_frame_size(), "Rejected oversized frame");
            }
            _ => {}
        }
        err
    }
}

impl Decoder for MessageCodec {
    type Item = Message;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Message>> {
        if src.len() < HEADER_LEN {
            return Ok(None);
        }

        let header = FrameHeader::parse(&src[..HEADER_LEN]).map_err(|e| self.reject(e))?;
        let frame_len = header.frame_len();
        if frame_len > self.max_frame_size() {
            return Err(self.reject(ProtocolError::OversizedFrame(frame_len)));
        }

        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        src.advance(HEADER_LEN);
        let remainder = src.split_to(header.payload_len()).freeze();

        let message = decode_payload(&header, remainder, self.config.body_length_policy)
            .map_err(|e| self.reject(e))?;

        self.metrics.frame_decoded(frame_len as u64);
        debug!(
            namespace = message.namespace(),
            key = message.key(),
            frame_len,
            "Decoded frame"
        );
        Ok(Some(message))
    }
}

impl Encoder<Message> for MessageCodec {
    type Error = ProtocolError;

    fn encode(&mut self, message: Message, dst: &mut BytesMut) -> Result<()> {
        let size =
            checked_frame_size(&message, self.max_frame_size()).map_err(|e| self.reject(e))?;
        dst.reserve(size);
        write_frame(&message, dst);

        self.metrics.frame_encoded(size as u64);
        debug!(
            namespace = message.namespace(),
            key = message.key(),
            frame_len = size,
            "Encoded frame"
        );
        Ok(())
    }
}
