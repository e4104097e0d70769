mod binder;
mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{FeederController, HttpFeederApi};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use binder::{commands::parse_command, Reply};
use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "feeder-console", about = "Terminal dashboard for a Wi-Fi pet feeder")]
struct Args {
    /// Settings file; missing is fine.
    #[arg(long, default_value = "feeder.toml")]
    config: PathBuf,
    #[arg(long)]
    device_url: Option<String>,
    #[arg(long)]
    poll_interval_ms: Option<u64>,
    #[arg(long)]
    request_timeout_ms: Option<u64>,
    #[arg(long)]
    slot_count: Option<usize>,
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.device_url {
            settings.device_url = url.clone();
        }
        if let Some(ms) = self.poll_interval_ms {
            settings.poll_interval_ms = ms;
        }
        if let Some(ms) = self.request_timeout_ms {
            settings.request_timeout_ms = ms;
        }
        if let Some(count) = self.slot_count {
            settings.slot_count = count;
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    args.apply(&mut settings);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api = HttpFeederApi::new(&settings.device_url, settings.request_timeout())
        .inspect_err(|err| error!("cannot set up feeder client: {err:#}"))?;
    info!(
        device_url = %settings.device_url,
        poll_interval_ms = settings.poll_interval_ms,
        slot_count = settings.slot_count,
        "feeder console starting"
    );

    let controller = FeederController::new(Arc::new(api), settings.slot_count);
    let renderer = binder::spawn_renderer(controller.subscribe());
    let poller = controller.spawn_polling(settings.poll_interval());

    println!("{}", binder::commands::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        match binder::run_command(&controller, command).await {
            Reply::Quiet => {}
            Reply::Print(text) => println!("{text}"),
            Reply::Quit => break,
        }
    }

    poller.abort();
    renderer.abort();
    info!("feeder console stopped");
    Ok(())
}
