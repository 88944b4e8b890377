//! Prediction-to-decision engine.
//!
//! A [`Predictor`] runs one request through Feature Builder → Model Adapter → Decision
//! Mapper. The [`DecisionEngine`] owns the three predictors and is what both front-ends call.

pub mod engine;
pub mod pipeline;
pub mod rules;
pub mod tables;

pub use engine::{DecisionEngine, ModelSet};
pub use pipeline::{ClvPredictor, DeliveryPredictor, FootfallPredictor, Predictor};
pub use rules::{Decision, DecisionTable, ThresholdRule};
