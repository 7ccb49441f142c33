//! # Core Frame Components
//!
//! Message model, header layout and the encode/decode paths.
//!
//! ## Components
//! - **Header**: fixed 16-byte header, validated parse and unvalidated peeks
//! - **Message**: namespaced message value type
//! - **Frame**: stateless `encode` / `decode` over plain buffers
//! - **Codec**: Tokio codec for framing over byte streams
//!
//! ## Wire Format
//! ```text
//! [Magic(2)] [Version(1)] [Key(1)] [Reserved(4)] [Compression(1)] [Reserved(1)]
//! [NamespaceLen(2)] [BodyLen(4)] [Namespace(N)] [Body(M)]
//! ```
//!
//! ## Security
//! - Maximum frame size: 1 MiB, checked from the header before buffering
//! - Magic and version checked before any length is trusted
//! - Every slice is bounds-checked against the buffer actually received

pub mod codec;
pub mod frame;
pub mod header;
pub mod message;
