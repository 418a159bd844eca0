use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use uniccc::{uniccc, Error};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    match uniccc(std::env::args_os().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Cli(error)) => error.exit(),
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
