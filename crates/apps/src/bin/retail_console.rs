use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use rp_apps::cli::ConsoleArgs;
use rp_apps::console::ConsoleApp;
use rp_runtime::{bootstrap, init_tracing, MetricsRegistry, RuntimeConfig, Uptime};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();
    let args = ConsoleArgs::parse();
    let cfg = args.models.apply(RuntimeConfig::from_env());

    let uptime = Uptime::start();
    let engine = bootstrap(&cfg).context("failed to load models")?;
    let metrics = MetricsRegistry::default();
    info!("retail_console starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    ConsoleApp::new(&engine, metrics.clone(), stdin.lock(), stdout.lock()).run()?;

    info!("{}", metrics.snapshot().to_json_line("retail_console", Some(uptime.elapsed())));
    Ok(())
}
