//! Command-line interface definitions and argument parsing

use std::path::PathBuf;

use clap::{Args, Parser};
use rp_runtime::RuntimeConfig;

/// Where to find the trained models. Flags override `RP_*` environment variables.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Directory holding footfall_model.json, delivery_model.json and clv_model.json
    #[arg(long)]
    pub models_dir: Option<PathBuf>,

    /// Footfall model artifact
    #[arg(long)]
    pub footfall_model: Option<PathBuf>,

    /// Delivery time model artifact
    #[arg(long)]
    pub delivery_model: Option<PathBuf>,

    /// Customer lifetime value model artifact
    #[arg(long)]
    pub clv_model: Option<PathBuf>,
}

impl ModelArgs {
    /// A `--models-dir` flag resets every artifact path to that directory before the
    /// per-model flags apply.
    pub fn apply(&self, mut cfg: RuntimeConfig) -> RuntimeConfig {
        if let Some(dir) = &self.models_dir {
            let bind_addr = std::mem::take(&mut cfg.bind_addr);
            cfg = RuntimeConfig { bind_addr, ..RuntimeConfig::with_models_dir(dir) };
        }
        if let Some(path) = &self.footfall_model {
            cfg.footfall_model = path.clone();
        }
        if let Some(path) = &self.delivery_model {
            cfg.delivery_model = path.clone();
        }
        if let Some(path) = &self.clv_model {
            cfg.clv_model = path.clone();
        }
        cfg
    }
}

/// Interactive console for footfall, delivery time and customer value predictions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ConsoleArgs {
    #[command(flatten)]
    pub models: ModelArgs,
}

/// Web form server for footfall, delivery time and customer value predictions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct WebArgs {
    #[command(flatten)]
    pub models: ModelArgs,

    /// Listen address, e.g. 0.0.0.0:8080
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl WebArgs {
    pub fn config(&self, base: RuntimeConfig) -> RuntimeConfig {
        let mut cfg = self.models.apply(base);
        if let Some(bind) = &self.bind {
            cfg.bind_addr = bind.clone();
        }
        cfg
    }
}
