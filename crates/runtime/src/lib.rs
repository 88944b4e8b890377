//! Process bootstrap shared by the console and web front-ends.

use rp_core::{PredictorKind, Result};
use rp_decisions::{DecisionEngine, ModelSet};
use rp_predictors::load_model;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod metrics;

pub use config::RuntimeConfig;
pub use metrics::{MetricsRegistry, MetricsSnapshot, Uptime};

/// Install the fmt subscriber on stderr. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load all three model handles. Runs once at startup; any failure is a
/// `ConfigurationError` and the process should not start.
pub fn load_models(cfg: &RuntimeConfig) -> Result<ModelSet> {
    info!(models_dir = %cfg.models_dir.display(), "loading models");
    Ok(ModelSet {
        footfall: load_model(cfg.model_path(PredictorKind::Footfall), PredictorKind::Footfall)?,
        delivery: load_model(cfg.model_path(PredictorKind::Delivery), PredictorKind::Delivery)?,
        clv: load_model(cfg.model_path(PredictorKind::Clv), PredictorKind::Clv)?,
    })
}

pub fn bootstrap(cfg: &RuntimeConfig) -> Result<DecisionEngine> {
    let models = load_models(cfg)?;
    info!("decision engine ready");
    Ok(DecisionEngine::new(models))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_core::CoreError;

    #[test]
    fn missing_model_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RuntimeConfig::with_models_dir(dir.path());
        assert!(matches!(bootstrap(&cfg), Err(CoreError::Configuration(_))));
    }
}
