//! Headless self-play runner.
//!
//! Usage: `warfront-selfplay [config.yaml] [num_matches]`
//!
//! Runs a batch of scripted-agent matches and prints the results as JSON on
//! stdout so balance sweeps can be piped into other tooling.

use std::process::ExitCode;

use tracing::{error, info};

use warfront_core::{load_selfplay_config, run_batch_selfplay, ConfigSource};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warfront_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) => ConfigSource::Path(path),
        None => ConfigSource::Defaults,
    };
    let num_matches: u32 = match args.next().map(|n| n.parse()).transpose() {
        Ok(n) => n.unwrap_or(10),
        Err(err) => {
            error!(%err, "match count must be an integer");
            return ExitCode::FAILURE;
        }
    };

    let config = match load_selfplay_config(source) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    info!(
        seed = config.seed,
        num_matches,
        agents = config.matchup.len(),
        "starting self-play batch"
    );

    let batch = match run_batch_selfplay(&config, num_matches) {
        Ok(batch) => batch,
        Err(err) => {
            error!(%err, "self-play batch failed");
            return ExitCode::FAILURE;
        }
    };

    info!(
        avg_length = batch.aggregate.avg_match_length,
        conquest_rate = batch.aggregate.conquest_rate,
        "batch complete"
    );

    match serde_json::to_string_pretty(&batch) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "failed to serialize results");
            ExitCode::FAILURE
        }
    }
}
