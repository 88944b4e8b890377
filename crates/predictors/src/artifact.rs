//! Serialized model artifacts and the loader used at startup.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use rp_core::{CoreError, PredictorKind};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{LinearModel, Model, ModelHandle, TreeEnsemble};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl Model for ModelSpec {
    fn arity(&self) -> usize {
        match self {
            Self::Linear(m) => m.arity(),
            Self::TreeEnsemble(m) => m.arity(),
        }
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        match self {
            Self::Linear(m) => m.predict(features),
            Self::TreeEnsemble(m) => m.predict(features),
        }
    }
}

/// On-disk form of a trained model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelArtifact {
    pub name: String,
    /// Column order the model was trained with.
    pub feature_names: Vec<String>,
    pub model: ModelSpec,
}

impl ModelArtifact {
    /// Check the artifact was trained on exactly `kind`'s schema, in the same order.
    pub fn validate(&self, kind: PredictorKind) -> rp_core::Result<()> {
        let expected = kind.feature_names();
        if self.feature_names.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(CoreError::Configuration(format!(
                "{} model {:?} was trained on {:?}, expected {:?}",
                kind, self.name, self.feature_names, expected
            )));
        }
        if self.model.arity() != expected.len() {
            return Err(CoreError::Configuration(format!(
                "{} model {:?} takes {} features, schema has {}",
                kind,
                self.name,
                self.model.arity(),
                expected.len()
            )));
        }
        if let ModelSpec::TreeEnsemble(ensemble) = &self.model {
            ensemble.validate().map_err(|e| {
                CoreError::Configuration(format!("{} model {:?}: {e:#}", kind, self.name))
            })?;
        }
        Ok(())
    }

    pub fn into_handle(self) -> ModelHandle {
        Arc::new(self.model)
    }
}

/// Read and validate the artifact for `kind`. Any failure is a configuration error.
pub fn load_model(path: &Path, kind: PredictorKind) -> rp_core::Result<ModelHandle> {
    info!(%kind, path = %path.display(), "loading model");
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Configuration(format!("cannot read {}: {e}", path.display())))?;
    let artifact: ModelArtifact = serde_json::from_str(&raw)
        .map_err(|e| CoreError::Configuration(format!("cannot parse {}: {e}", path.display())))?;
    artifact.validate(kind)?;
    info!(%kind, name = %artifact.name, arity = artifact.model.arity(), "model loaded");
    Ok(artifact.into_handle())
}
