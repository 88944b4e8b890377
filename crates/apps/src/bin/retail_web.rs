use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use rp_apps::cli::WebArgs;
use rp_apps::web::{serve, AppState};
use rp_runtime::{bootstrap, init_tracing, RuntimeConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = WebArgs::parse();
    let cfg = args.config(RuntimeConfig::from_env());
    let addr: SocketAddr = cfg
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {:?}", cfg.bind_addr))?;

    let engine = bootstrap(&cfg).context("failed to load models")?;
    info!("retail_web starting");
    serve(addr, AppState::new(engine)).await
}
