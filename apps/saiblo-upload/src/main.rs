//! `saiblo-upload` entry point.

mod app;
mod cli;
mod config;
mod report;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{Config, FileConfig, TOKEN_ENV, credential_from_env};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the result.
    let default_filter = if cli.verbose {
        "warn,saiblo_upload=debug,saiblo_submit=debug,saiblo_api=debug,saiblo_realtime=debug,saiblo_archive=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(credential) = credential_from_env() else {
        eprintln!("Error: set the {TOKEN_ENV} environment variable to your Saiblo login token.");
        return ExitCode::from(report::EXIT_MISSING_CREDENTIAL);
    };

    if !cli.path.is_dir() {
        eprintln!("Error: {} is not a directory!", cli.path.display());
        let _ = Cli::command().print_help();
        return ExitCode::from(report::EXIT_INVALID_SOURCE);
    }

    match start(&cli, credential) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(report::EXIT_OTHER)
        }
    }
}

fn start(cli: &Cli, credential: saiblo_protocol::Credential) -> anyhow::Result<ExitCode> {
    let file = FileConfig::load(cli.config.as_deref())?;
    let config = Config::new(cli, credential, file);
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        deployment = ?config.deployment,
        api = %config.api_base,
        "starting upload"
    );

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(app::run(cli, &config))?;
    Ok(report::finish(result))
}
