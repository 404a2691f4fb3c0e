//! Configuration types for the UI message channel.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default socket path used when none is configured
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/symquery-ui.sock";

/// Default upper bound on a single message, in bytes
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 4096;

/// Default liveness message
pub const DEFAULT_HEARTBEAT: &str = "alive";

/// Configuration for opening a message channel.
///
/// This type provides a builder-style API and can also be loaded from a JSON
/// file; missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use symquery::app::ChannelConfig;
///
/// let config = ChannelConfig::new("/tmp/ui.sock")
///     .with_max_message_len(256)
///     .with_heartbeat("ping");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Path of the Unix domain socket
    pub socket_path: PathBuf,
    /// Longest message accepted by `send`, in bytes
    pub max_message_len: usize,
    /// Message sent by `report_alive`
    pub heartbeat: String,
}

impl ChannelConfig {
    /// Create a configuration for the given socket path.
    ///
    /// Uses default values for other parameters:
    /// - Max message length: 4096 bytes
    /// - Heartbeat: `"alive"`
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            heartbeat: DEFAULT_HEARTBEAT.to_string(),
        }
    }

    /// Set the maximum message length.
    pub fn with_max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    /// Set the liveness message.
    pub fn with_heartbeat(mut self, heartbeat: impl Into<String>) -> Self {
        self.heartbeat = heartbeat.into();
        self
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails [`ChannelConfig::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can open a working channel.
    pub fn validate(&self) -> Result<()> {
        if self.max_message_len == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_message_len must be positive".to_string(),
            });
        }
        if self.heartbeat.is_empty() || self.heartbeat.contains('\n') {
            return Err(Error::InvalidConfiguration {
                message: "heartbeat must be a non-empty single line".to_string(),
            });
        }
        if self.heartbeat.len() > self.max_message_len {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "heartbeat of {} bytes exceeds max_message_len {}",
                    self.heartbeat.len(),
                    self.max_message_len
                ),
            });
        }
        Ok(())
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_PATH)
    }
}
