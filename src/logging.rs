//! File-only diagnostics. The terminal itself belongs to the game screen, so
//! nothing is ever logged to stdout or stderr while a session runs.

use std::fs::OpenOptions;
use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the log file.
pub const LOG_PATH_ENV: &str = "NADAROTH_LOG";

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "nadaroth=info,term_input=info";

/// `RUST_LOG` if it parses, otherwise [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber if `NADAROTH_LOG` is set.
///
/// Sessions append to the same file. A file that cannot be opened disables
/// logging with a warning printed before the screen is taken over.
pub fn init_tracing() {
    let Some(log_path) = std::env::var_os(LOG_PATH_ENV) else {
        return;
    };
    let log_path = Path::new(&log_path);

    let file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("nadaroth: logging disabled, cannot open {}: {err}", log_path.display());
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();
}
