//! Error types for terminal control and configuration.
//!
//! Terminal errors are fatal: a full-screen application cannot run safely
//! without raw-mode control, so they propagate to `main`, which reports them
//! and exits non-zero. Configuration errors are reported before the terminal
//! is touched.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while switching the terminal in or out of raw mode.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// `tcgetattr` or `fcntl(F_GETFL)` failed while capturing the original mode.
    #[error("failed to query terminal attributes: {0}")]
    Query(#[source] io::Error),

    /// `tcsetattr` failed.
    #[error("failed to apply terminal attributes: {0}")]
    Apply(#[source] io::Error),

    /// `fcntl(F_SETFL, O_NONBLOCK)` failed.
    #[error("failed to configure non-blocking input: {0}")]
    NonBlocking(#[source] io::Error),

    /// A termination signal handler could not be installed.
    #[error("failed to register signal handler: {0}")]
    Signal(#[source] io::Error),

    /// Writing control sequences to the terminal failed.
    #[error("failed to write terminal control sequences: {0}")]
    Output(#[source] io::Error),
}

/// Failures while loading or validating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
