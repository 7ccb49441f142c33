//! # Utility Modules
//!
//! Supporting utilities for observability.
//!
//! ## Components
//! - **Logging**: `tracing-subscriber` setup from `LoggingConfig`
//! - **Metrics**: thread-safe codec counters

pub mod logging;
pub mod metrics;
