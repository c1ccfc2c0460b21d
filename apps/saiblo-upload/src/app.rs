//! Wires the configuration into the upload flow.

use saiblo_submit::{CompiledCode, RealtimeConnector, SubmitError, SubmitRequest, run_upload};

use crate::cli::Cli;
use crate::config::Config;

/// Builds the request from the command line.
pub fn submit_request(cli: &Cli) -> SubmitRequest {
    SubmitRequest {
        game: cli.game.clone(),
        ai_name: cli.name.clone(),
        repo: cli.repo.clone(),
        commit: cli.commit.clone(),
        language: cli.lang.into(),
        source_dir: cli.path.clone(),
    }
}

/// Runs one upload against the configured site.
///
/// The outer error covers client construction; the inner result is the
/// outcome of the upload itself.
pub async fn run(
    cli: &Cli,
    config: &Config,
) -> anyhow::Result<Result<CompiledCode, SubmitError>> {
    let api = saiblo_api::Client::new(&config.api_base, &config.credential)?;
    let connector = RealtimeConnector::new(config.ws_base.clone(), config.credential.clone());
    let request = submit_request(cli);

    Ok(run_upload(&request, &api, &connector, config.compile_timeout).await)
}
