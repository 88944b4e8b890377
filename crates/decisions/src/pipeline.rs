use std::marker::PhantomData;

use rp_core::clv::{ClvInputs, ClvSegment};
use rp_core::delivery::{DeliveryInputs, DeliveryRisk};
use rp_core::footfall::{FootfallInputs, FootfallTier};
use rp_core::{
    CoreError, FeatureBuilder, FieldSource, PredictionResult, PredictorKind, Result, Tier,
};
use rp_predictors::{ModelAdapter, ModelHandle};
use tracing::{debug, error, warn};

use crate::rules::DecisionTable;
use crate::tables;

/// Feature Builder, Model Adapter and Decision Mapper for one business question.
/// Holds no state besides the shared model handle.
pub struct Predictor<I, T: 'static> {
    adapter: ModelAdapter,
    table: &'static DecisionTable<T>,
    _inputs: PhantomData<fn(&I)>,
}

pub type FootfallPredictor = Predictor<FootfallInputs, FootfallTier>;
pub type DeliveryPredictor = Predictor<DeliveryInputs, DeliveryRisk>;
pub type ClvPredictor = Predictor<ClvInputs, ClvSegment>;

impl<I: FeatureBuilder, T: Tier> Predictor<I, T> {
    pub fn with_table(model: ModelHandle, table: &'static DecisionTable<T>) -> Self {
        Self { adapter: ModelAdapter::new(I::KIND, model), table, _inputs: PhantomData }
    }

    pub fn kind(&self) -> PredictorKind {
        I::KIND
    }

    pub fn table(&self) -> &'static DecisionTable<T> {
        self.table
    }

    /// Build, predict, classify. Invalid input is rejected before the model is touched.
    pub fn infer(&self, inputs: &I) -> Result<PredictionResult<T>> {
        self.run(inputs).map_err(|e| log_failure(I::KIND, e))
    }

    /// Same as [`infer`](Self::infer), starting from raw string fields.
    pub fn infer_fields<S: FieldSource + ?Sized>(&self, source: &S) -> Result<PredictionResult<T>> {
        let inputs = I::from_fields(source).map_err(|e| log_failure(I::KIND, e))?;
        self.infer(&inputs)
    }

    fn run(&self, inputs: &I) -> Result<PredictionResult<T>> {
        let vector = inputs.build()?;
        let scalar = self.adapter.predict(&vector)?;
        let decision = self.table.classify(scalar);
        let kind = I::KIND;
        debug!(%kind, scalar, tier = decision.tier.code(), "prediction classified");
        Ok(PredictionResult {
            scalar,
            tier: decision.tier,
            recommendation: decision.recommendation,
        })
    }
}

impl FootfallPredictor {
    pub fn new(model: ModelHandle) -> Self {
        Self::with_table(model, &tables::FOOTFALL)
    }
}

impl DeliveryPredictor {
    pub fn new(model: ModelHandle) -> Self {
        Self::with_table(model, &tables::DELIVERY)
    }
}

impl ClvPredictor {
    pub fn new(model: ModelHandle) -> Self {
        Self::with_table(model, &tables::CLV)
    }
}

fn log_failure(kind: PredictorKind, err: CoreError) -> CoreError {
    match &err {
        CoreError::InvalidInput { field, reason } => {
            warn!(%kind, field = *field, %reason, "input rejected")
        }
        other => error!(%kind, error = %other, "prediction failed"),
    }
    err
}
