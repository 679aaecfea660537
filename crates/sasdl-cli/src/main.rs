use sasdl_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Log file under XDG state; stderr if it cannot be opened.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::debug!("log file unavailable: {:#}", e);
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("sasdl error: {:#}", err);
        std::process::exit(1);
    }
}
