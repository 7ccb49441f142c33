//! # Error Types
//!
//! Error handling for the frame codec.
//!
//! Every decode rejection is reported as [`ProtocolError::MalformedFrame`],
//! carrying a [`Malformed`] reason so callers can match the exact cause
//! without parsing messages. The remaining variants cover producer-side
//! precondition failures, stream I/O and configuration.
//!
//! ## Example Usage
//! ```rust
//! use nsframe::error::{Malformed, ProtocolError};
//! use nsframe::core::frame::decode;
//!
//! let header = [0u8; 16];
//! match decode(&header, &[]) {
//!     Err(ProtocolError::MalformedFrame(Malformed::Magic(_))) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Reason a frame was rejected during decode.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Malformed {
    #[error("header must be 16 bytes, got {0}")]
    HeaderLength(usize),

    #[error("bad magic bytes {0:02X?}")]
    Magic([u8; 2]),

    #[error("unsupported version {0:#04x}")]
    Version(u8),

    #[error("namespace length {declared} exceeds {available} available bytes")]
    NamespaceOutOfBounds { declared: usize, available: usize },

    #[error("declared body length {declared} but {actual} bytes follow the namespace")]
    BodyLengthMismatch { declared: usize, actual: usize },

    #[error("namespace is not valid UTF-8")]
    NamespaceEncoding,
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    #[serde(skip_serializing, skip_deserializing)]
    Io(#[from] io::Error),

    #[error("Malformed frame: {0}")]
    MalformedFrame(#[from] Malformed),

    #[error("Frame too large: {0} bytes")]
    OversizedFrame(usize),

    #[error("Namespace too long: {0} bytes (maximum 65535)")]
    NamespaceTooLong(usize),

    #[error("Body too long: {0} bytes")]
    BodyTooLong(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Returns the rejection reason if this is a malformed-frame error.
    pub fn malformed(&self) -> Option<Malformed> {
        match self {
            ProtocolError::MalformedFrame(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
