use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use term_input::LoopConfig;

use crate::error::ConfigError;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputSettings,
}

/// Input loop tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Bytes requested per read (default: 128).
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Sleep when no input is available, in milliseconds (default: 1).
    #[serde(default = "default_idle_sleep_ms")]
    pub idle_sleep_ms: u64,
    /// Maximum unconsumed input before it is discarded (default: 1024).
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

fn default_chunk_size() -> usize {
    128
}

fn default_idle_sleep_ms() -> u64 {
    1
}

fn default_buffer_capacity() -> usize {
    1024
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            idle_sleep_ms: default_idle_sleep_ms(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl Config {
    /// `<config dir>/nadaroth/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nadaroth").join("config.toml"))
    }

    /// Load from `path`, or from [`default_path`](Self::default_path).
    ///
    /// A missing default file yields defaults; a missing explicit file is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_toml_str(&contents)
            }
            Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let input = &self.input;
        if input.chunk_size == 0 {
            return Err(ConfigError::Invalid("input.chunk_size must be greater than 0".into()));
        }
        if input.idle_sleep_ms == 0 {
            return Err(ConfigError::Invalid("input.idle_sleep_ms must be greater than 0".into()));
        }
        if input.buffer_capacity < input.chunk_size {
            return Err(ConfigError::Invalid(format!(
                "input.buffer_capacity ({}) must be at least input.chunk_size ({})",
                input.buffer_capacity, input.chunk_size
            )));
        }
        Ok(())
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            chunk_size: self.input.chunk_size,
            idle_sleep: Duration::from_millis(self.input.idle_sleep_ms),
            buffer_capacity: self.input.buffer_capacity,
        }
    }
}
