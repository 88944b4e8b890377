//! Environment configuration

use std::path::{Path, PathBuf};

use rp_core::PredictorKind;

pub const DEFAULT_MODELS_DIR: &str = "models";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory holding the trained model artifacts.
    pub models_dir: PathBuf,

    pub footfall_model: PathBuf,
    pub delivery_model: PathBuf,
    pub clv_model: PathBuf,

    /// Listen address for the web front-end.
    pub bind_addr: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::with_models_dir(DEFAULT_MODELS_DIR)
    }
}

impl RuntimeConfig {
    /// Default artifact names (`<kind>_model.json`) inside `dir`.
    pub fn with_models_dir(dir: impl Into<PathBuf>) -> Self {
        let models_dir = dir.into();
        Self {
            footfall_model: default_artifact(&models_dir, PredictorKind::Footfall),
            delivery_model: default_artifact(&models_dir, PredictorKind::Delivery),
            clv_model: default_artifact(&models_dir, PredictorKind::Clv),
            models_dir,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let models_dir =
            lookup("RP_MODELS_DIR").unwrap_or_else(|| DEFAULT_MODELS_DIR.to_string());
        let mut cfg = Self::with_models_dir(models_dir);
        if let Some(path) = lookup("RP_FOOTFALL_MODEL") {
            cfg.footfall_model = path.into();
        }
        if let Some(path) = lookup("RP_DELIVERY_MODEL") {
            cfg.delivery_model = path.into();
        }
        if let Some(path) = lookup("RP_CLV_MODEL") {
            cfg.clv_model = path.into();
        }
        if let Some(addr) = lookup("RP_BIND_ADDR") {
            cfg.bind_addr = addr;
        }
        cfg
    }

    pub fn model_path(&self, kind: PredictorKind) -> &Path {
        match kind {
            PredictorKind::Footfall => &self.footfall_model,
            PredictorKind::Delivery => &self.delivery_model,
            PredictorKind::Clv => &self.clv_model,
        }
    }
}

fn default_artifact(dir: &Path, kind: PredictorKind) -> PathBuf {
    dir.join(format!("{}_model.json", kind.as_str()))
}
