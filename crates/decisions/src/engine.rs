use rp_core::{FieldSource, PredictionSummary, PredictorKind, Result};
use rp_predictors::ModelHandle;

use crate::pipeline::{ClvPredictor, DeliveryPredictor, FootfallPredictor};

/// The three model handles, produced once by the startup phase.
#[derive(Clone)]
pub struct ModelSet {
    pub footfall: ModelHandle,
    pub delivery: ModelHandle,
    pub clv: ModelHandle,
}

/// Shared entry point for every front-end. Immutable after construction, so it can sit
/// behind an `Arc` and serve concurrent requests without locking.
pub struct DecisionEngine {
    footfall: FootfallPredictor,
    delivery: DeliveryPredictor,
    clv: ClvPredictor,
}

impl DecisionEngine {
    pub fn new(models: ModelSet) -> Self {
        Self {
            footfall: FootfallPredictor::new(models.footfall),
            delivery: DeliveryPredictor::new(models.delivery),
            clv: ClvPredictor::new(models.clv),
        }
    }

    pub fn footfall(&self) -> &FootfallPredictor {
        &self.footfall
    }

    pub fn delivery(&self) -> &DeliveryPredictor {
        &self.delivery
    }

    pub fn clv(&self) -> &ClvPredictor {
        &self.clv
    }

    /// Parse raw fields for `kind`, run its predictor and erase the tier type.
    pub fn infer_fields<S: FieldSource + ?Sized>(
        &self,
        kind: PredictorKind,
        source: &S,
    ) -> Result<PredictionSummary> {
        match kind {
            PredictorKind::Footfall => self.footfall.infer_fields(source).map(|r| r.summary(kind)),
            PredictorKind::Delivery => self.delivery.infer_fields(source).map(|r| r.summary(kind)),
            PredictorKind::Clv => self.clv.infer_fields(source).map(|r| r.summary(kind)),
        }
    }
}
