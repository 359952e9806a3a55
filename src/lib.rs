pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod prompts;
pub mod questions;
pub mod report;
pub mod runner;
pub mod smart_table;
pub mod table;

pub use cli::{AnalysisOptions, Cli};
pub use error::{AnalystError, Result};
pub use runner::RunSummary;

use config::Settings;

/// Resolve settings for this invocation: `.env`, config file, environment,
/// then command-line overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load()?;
    if let Some(model) = &cli.model {
        settings.llm.model = model.clone();
    }
    if let Some(delimiter) = cli.delimiter {
        settings.table.delimiter = delimiter;
    }
    Ok(settings)
}

/// Main library entry point
pub fn run(cli: &Cli) -> Result<RunSummary> {
    let settings = load_settings(cli)?;
    let options = AnalysisOptions::from(cli);
    let api_key = settings.llm.api_key_from_env();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner::run_analysis(&options, &settings, api_key, clients::connect, &mut out)
}
