//! # Configuration Management
//!
//! Wire constants and runtime configuration for the frame codec.
//!
//! The constants describe the fixed frame layout and never change at runtime.
//! [`CodecConfig`] carries the settings a deployment may tune: the frame size
//! ceiling (only ever lowered below [`MAX_FRAME_SIZE`]), how decode treats the
//! declared body length, and logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()` / `from_toml()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::Level;

/// Current supported wire format revision
pub const PROTOCOL_VERSION: u8 = 0x02;

/// Magic bytes opening every frame
pub const MAGIC_BYTES: [u8; 2] = [0x5C, 0x4E];

/// Fixed header size in bytes
pub const HEADER_LEN: usize = 16;

/// Max total frame size, header included (1 MiB)
pub const MAX_FRAME_SIZE: usize = 1 << 20;

/// Largest namespace the 16-bit length field can describe
pub const MAX_NAMESPACE_LEN: usize = u16::MAX as usize;

/// How decode reconciles the declared body length with the bytes it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyLengthPolicy {
    /// The remainder must be exactly `namespace_len + body_len` bytes.
    #[default]
    Strict,
    /// Everything after the namespace is body; `body_len` is advisory.
    Lenient,
}

impl FromStr for BodyLengthPolicy {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(BodyLengthPolicy::Strict),
            "lenient" => Ok(BodyLengthPolicy::Lenient),
            other => Err(ProtocolError::ConfigError(format!(
                "Unknown body length policy: '{other}' (expected 'strict' or 'lenient')"
            ))),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecConfig {
    /// Framing limits and decode policy
    #[serde(default)]
    pub frame: FrameConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables, starting from defaults.
    ///
    /// Unparseable numbers and levels are ignored; an unknown policy name or
    /// a result that fails validation is an error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(size) = std::env::var("NSFRAME_MAX_FRAME_SIZE") {
            if let Ok(val) = size.parse::<usize>() {
                config.frame.max_frame_size = val;
            }
        }

        if let Ok(policy) = std::env::var("NSFRAME_BODY_LENGTH_POLICY") {
            config.frame.body_length_policy = policy.parse()?;
        }

        if let Ok(level) = std::env::var("NSFRAME_LOG_LEVEL") {
            if let Ok(val) = Level::from_str(&level) {
                config.logging.log_level = val;
            }
        }

        config.validate_strict()?;
        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.frame.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Framing limits and decode policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Largest frame accepted or produced, header included
    pub max_frame_size: usize,

    /// Treatment of the declared body length on decode
    pub body_length_policy: BodyLengthPolicy,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_size: MAX_FRAME_SIZE,
            body_length_policy: BodyLengthPolicy::Strict,
        }
    }
}

impl FrameConfig {
    /// Validate frame configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_frame_size < HEADER_LEN {
            errors.push(format!(
                "Max frame size too small: {} bytes (minimum: {HEADER_LEN})",
                self.max_frame_size
            ));
        } else if self.max_frame_size > MAX_FRAME_SIZE {
            errors.push(format!(
                "Max frame size too large: {} bytes (maximum: {MAX_FRAME_SIZE})",
                self.max_frame_size
            ));
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("nsframe"),
            log_level: Level::INFO,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
