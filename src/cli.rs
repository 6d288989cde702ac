use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Full-screen terminal explorer driven by keyboard and mouse.
#[derive(Debug, Parser)]
#[command(name = "nadaroth", version, about)]
pub struct Args {
    /// Config file (defaults to <config dir>/nadaroth/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Bytes requested per read.
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Sleep between reads when no input is available.
    #[arg(long = "idle-ms", value_name = "MS")]
    pub idle_sleep_ms: Option<u64>,

    /// Maximum unconsumed input before it is discarded.
    #[arg(long, value_name = "N")]
    pub buffer_capacity: Option<usize>,
}

impl Args {
    /// Overlay command-line values on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(chunk_size) = self.chunk_size {
            config.input.chunk_size = chunk_size;
        }
        if let Some(idle_sleep_ms) = self.idle_sleep_ms {
            config.input.idle_sleep_ms = idle_sleep_ms;
        }
        if let Some(buffer_capacity) = self.buffer_capacity {
            config.input.buffer_capacity = buffer_capacity;
        }
    }
}
