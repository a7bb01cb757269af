use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use config::Config;
use utils::logger::init_default_logger;

mod allowlist;
mod cli;
mod config;
mod db;
mod modules;
mod utils;

#[tokio::main]
async fn main() -> ExitCode {
    let _guard = init_default_logger();

    let cli = Cli::parse();

    let config = match Config::read_default().await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to read database configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = modules::load_allowlist(&cli, &config).await {
        tracing::error!("Load failed: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
