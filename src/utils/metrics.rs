//! Codec Metrics
//!
//! Atomic counters for frames moving through [`MessageCodec`](crate::core::codec::MessageCodec).
//! Clones of a codec share one `Arc<CodecMetrics>`, so a connection's reader
//! and writer halves report into the same counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Counters for encoded and decoded frames
#[derive(Debug)]
pub struct CodecMetrics {
    /// Frames written by the encoder
    pub frames_encoded: AtomicU64,
    /// Bytes written by the encoder, headers included
    pub bytes_encoded: AtomicU64,
    /// Frames produced by the decoder
    pub frames_decoded: AtomicU64,
    /// Bytes consumed by the decoder, headers included
    pub bytes_decoded: AtomicU64,
    /// Frames rejected as malformed
    pub malformed_frames: AtomicU64,
    /// Frames rejected for exceeding the size limit, either direction
    pub oversized_frames: AtomicU64,
    start_time: Instant,
}

impl CodecMetrics {
    pub fn new() -> Self {
        Self {
            frames_encoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            frames_decoded: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            malformed_frames: AtomicU64::new(0),
            oversized_frames: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn frame_encoded(&self, byte_count: u64) {
        self.frames_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn frame_decoded(&self, byte_count: u64) {
        self.frames_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn malformed_frame(&self) {
        self.malformed_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn oversized_frame(&self) {
        self.oversized_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_encoded: self.frames_encoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            frames_decoded: self.frames_decoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            malformed_frames: self.malformed_frames.load(Ordering::Relaxed),
            oversized_frames: self.oversized_frames.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            frames_encoded = snapshot.frames_encoded,
            bytes_encoded = snapshot.bytes_encoded,
            frames_decoded = snapshot.frames_decoded,
            bytes_decoded = snapshot.bytes_decoded,
            malformed_frames = snapshot.malformed_frames,
            oversized_frames = snapshot.oversized_frames,
            uptime_seconds = snapshot.uptime_seconds,
            "Codec metrics snapshot"
        );
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub frames_encoded: u64,
    pub bytes_encoded: u64,
    pub frames_decoded: u64,
    pub bytes_decoded: u64,
    pub malformed_frames: u64,
    pub oversized_frames: u64,
    pub uptime_seconds: u64,
}
