use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csv_analyst::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "csv_analyst=debug"
    } else {
        "csv_analyst=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match csv_analyst::run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.boundary_message());
            ExitCode::FAILURE
        }
    }
}
