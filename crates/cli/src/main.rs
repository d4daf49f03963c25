use std::process::ExitCode;

use clap::Parser;
use smia_cli::cli::Cli;
use smia_cli::{commands, logging};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	match commands::dispatch(cli).await {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(err) => {
			error!(target = "smia", error = %err, "command failed");
			eprintln!("Error: {err:#}");
			ExitCode::FAILURE
		}
	}
}
