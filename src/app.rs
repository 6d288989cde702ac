use std::io;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use term_input::{InputLoop, TtyReader};

use crate::cli::Args;
use crate::config::Config;
use crate::explorer::Explorer;
use crate::terminal;

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user quit from inside the application.
    Quit,
    /// SIGINT or SIGTERM.
    Terminated,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Quit => ExitCode::SUCCESS,
            Outcome::Terminated => ExitCode::FAILURE,
        }
    }
}

/// Parse arguments, take over the terminal, and dispatch input until the
/// user quits or a termination signal arrives.
pub fn run() -> anyhow::Result<Outcome> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref()).context("loading configuration")?;
    args.apply(&mut config);
    config.validate()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let mut guard = terminal::setup_terminal(&shutdown).context("preparing terminal")?;
    tracing::info!(config = ?config.input, "session started");

    let mut input = InputLoop::new(config.loop_config());
    let mut explorer = Explorer::new(io::stdout(), Arc::clone(&shutdown));
    let mut reader = TtyReader::stdin();
    let looped = input.run(&mut reader, &mut explorer, &shutdown);

    guard.restore().context("restoring terminal")?;
    looped.context("reading terminal input")?;
    if let Some(err) = explorer.take_render_error() {
        return Err(err).context("writing to terminal");
    }

    let outcome = if explorer.quit_requested() {
        Outcome::Quit
    } else {
        Outcome::Terminated
    };
    tracing::info!(?outcome, "session ended");
    Ok(outcome)
}
