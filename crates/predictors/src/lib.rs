//! Model trait, the adapter every predictor invokes, and baseline stubs.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use rp_core::{CoreError, FeatureVector, PredictorKind};

pub mod artifact;
pub mod linear;
pub mod tree;

pub use artifact::{load_model, ModelArtifact, ModelSpec};
pub use linear::LinearModel;
pub use tree::{Aggregation, Node, RegressionTree, SplitRule, TreeEnsemble};

/// A pre-trained regressor. Implementations hold no mutable state, so one handle can be
/// shared by any number of concurrent callers.
pub trait Model: Send + Sync {
    /// Number of features the model was trained on.
    fn arity(&self) -> usize;

    fn predict(&self, features: &[f64]) -> Result<f64>;
}

/// Loaded once at startup, shared read-only for the life of the process.
pub type ModelHandle = Arc<dyn Model>;

/// Binds a model handle to the predictor whose vectors it accepts.
#[derive(Clone)]
pub struct ModelAdapter {
    kind: PredictorKind,
    model: ModelHandle,
}

impl ModelAdapter {
    pub fn new(kind: PredictorKind, model: ModelHandle) -> Self {
        Self { kind, model }
    }

    pub fn kind(&self) -> PredictorKind {
        self.kind
    }

    /// Invoke the model. Never retried: a failure here is not transient.
    pub fn predict(&self, vector: &FeatureVector) -> rp_core::Result<f64> {
        if vector.kind() != self.kind {
            return Err(CoreError::ModelInvocation(format!(
                "{} model was given a {} feature vector",
                self.kind,
                vector.kind()
            )));
        }
        predict(self.model.as_ref(), vector)
    }
}

impl fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("kind", &self.kind)
            .field("arity", &self.model.arity())
            .finish()
    }
}

/// Checks arity, runs the model and rejects non-finite output.
pub fn predict(model: &dyn Model, vector: &FeatureVector) -> rp_core::Result<f64> {
    if vector.len() != model.arity() {
        return Err(CoreError::ModelInvocation(format!(
            "model expects {} features, got {}",
            model.arity(),
            vector.len()
        )));
    }
    let value = model
        .predict(vector.values())
        .map_err(|e| CoreError::ModelInvocation(format!("{e:#}")))?;
    if !value.is_finite() {
        let reason = format!("model produced a non-finite value ({value})");
        return Err(CoreError::ModelInvocation(reason));
    }
    Ok(value)
}

/// Returns the same scalar for any correctly sized input. Used for wiring and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantModel {
    pub arity: usize,
    pub value: f64,
}

impl ConstantModel {
    pub fn new(arity: usize, value: f64) -> Self {
        Self { arity, value }
    }

    pub fn for_kind(kind: PredictorKind, value: f64) -> Self {
        Self::new(kind.arity(), value)
    }
}

impl Model for ConstantModel {
    fn arity(&self) -> usize {
        self.arity
    }

    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_core::footfall::FootfallInputs;
    use rp_core::FeatureBuilder;

    struct Failing;

    impl Model for Failing {
        fn arity(&self) -> usize {
            5
        }

        fn predict(&self, _features: &[f64]) -> Result<f64> {
            anyhow::bail!("corrupt weights")
        }
    }

    fn footfall_vector() -> FeatureVector {
        FootfallInputs { day_of_week: 1, is_holiday: false, promo_active: true, month: 4 }
            .build()
            .unwrap()
    }

    #[test]
    fn returns_model_output() {
        let adapter = ModelAdapter::new(
            PredictorKind::Footfall,
            Arc::new(ConstantModel::for_kind(PredictorKind::Footfall, 412.0)),
        );
        assert_eq!(adapter.predict(&footfall_vector()).unwrap(), 412.0);
    }

    #[test]
    fn arity_mismatch_is_invocation_error() {
        let model = Arc::new(ConstantModel::new(8, 1.0));
        let adapter = ModelAdapter::new(PredictorKind::Footfall, model);
        let err = adapter.predict(&footfall_vector()).unwrap_err();
        let CoreError::ModelInvocation(message) = &err else {
            panic!("expected an invocation error, got {err:?}");
        };
        assert!(message.contains("expects 8 features, got 5"), "{message}");
    }

    #[test]
    fn wrong_predictor_vector_is_rejected() {
        let adapter = ModelAdapter::new(PredictorKind::Clv, Arc::new(ConstantModel::new(5, 1.0)));
        assert!(matches!(adapter.predict(&footfall_vector()), Err(CoreError::ModelInvocation(_))));
    }

    #[test]
    fn model_errors_surface_immediately() {
        let adapter = ModelAdapter::new(PredictorKind::Footfall, Arc::new(Failing));
        let err = adapter.predict(&footfall_vector()).unwrap_err();
        assert!(matches!(err, CoreError::ModelInvocation(ref m) if m.contains("corrupt weights")));
    }

    #[test]
    fn non_finite_outputs_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let adapter = ModelAdapter::new(
                PredictorKind::Footfall,
                Arc::new(ConstantModel::for_kind(PredictorKind::Footfall, value)),
            );
            let outcome = adapter.predict(&footfall_vector());
            assert!(matches!(outcome, Err(CoreError::ModelInvocation(_))));
        }
    }

    #[test]
    fn handles_are_shareable_across_threads() {
        let adapter = ModelAdapter::new(
            PredictorKind::Footfall,
            Arc::new(ConstantModel::for_kind(PredictorKind::Footfall, 300.0)),
        );
        let vector = footfall_vector();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(adapter.predict(&vector).unwrap(), 300.0));
            }
        });
    }
}
