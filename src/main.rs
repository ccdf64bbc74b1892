use clap::Parser;
use dirsort::cli::{Cli, init_logging, run_cli};
use dirsort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run_cli(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "run aborted");
            OutputFormatter::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
