mod commands;
mod config;
mod error;
mod local_state;
mod render;
mod session;

use std::{process::ExitCode, time::Duration};

use client::HttpStore;
use engine::Tracker;

use crate::{error::Result, local_state::LocalState};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let (settings, command) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fintrack={level},engine={level},client={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .build()?;
    let store = HttpStore::with_client(http, &settings.base_url)?;
    let tracker = Tracker::builder().store(store).build()?;
    tracing::debug!(base_url = %tracker.store().base_url(), "store ready");

    let mut state = LocalState::load(&settings.state_path)?;
    let output = commands::run(&tracker, &settings, &mut state, command).await?;
    print!("{output}");
    Ok(())
}
