use std::process::ExitCode;

fn main() -> ExitCode {
    nadaroth::logging::init_tracing();
    match nadaroth::app::run() {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("nadaroth: {err:#}");
            ExitCode::FAILURE
        }
    }
}
