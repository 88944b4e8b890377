//! Core types and traits for RetailPredict.
//!
//! Each predictor (footfall, delivery, customer value) turns raw business inputs into a
//! [`FeatureVector`] whose field order matches the one its model was trained with. The
//! order is load-bearing: models take plain positional slices and cannot detect a swap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod clv;
pub mod delivery;
pub mod fields;
pub mod footfall;

pub use fields::FieldSource;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PredictorKind {
    Footfall,
    Delivery,
    Clv,
}

impl PredictorKind {
    pub const ALL: [PredictorKind; 3] = [Self::Footfall, Self::Delivery, Self::Clv];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Footfall => "footfall",
            Self::Delivery => "delivery",
            Self::Clv => "clv",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Footfall => "Store Footfall Prediction",
            Self::Delivery => "Delivery Time Prediction",
            Self::Clv => "Customer Lifetime Value (CLV) Prediction",
        }
    }

    /// Model feature names in training order.
    pub fn feature_names(self) -> &'static [&'static str] {
        match self {
            Self::Footfall => &footfall::FEATURE_NAMES,
            Self::Delivery => &delivery::FEATURE_NAMES,
            Self::Clv => &clv::FEATURE_NAMES,
        }
    }

    /// Raw fields a caller supplies, in prompt order. Derived features are absent.
    pub fn input_fields(self) -> &'static [InputField] {
        match self {
            Self::Footfall => &footfall::INPUT_FIELDS,
            Self::Delivery => &delivery::INPUT_FIELDS,
            Self::Clv => &clv::INPUT_FIELDS,
        }
    }

    pub fn arity(self) -> usize {
        self.feature_names().len()
    }
}

impl fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "footfall" => Ok(Self::Footfall),
            "delivery" => Ok(Self::Delivery),
            "clv" => Ok(Self::Clv),
            other => Err(CoreError::invalid("kind", format!("unknown predictor {other:?}"))),
        }
    }
}

/// How a raw field is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Integer,
    Decimal,
    Flag,
}

/// Description of one raw input, shared by the console prompts and the web forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
}

/// Ordered numeric encoding of one request. Only the feature builders in this crate can
/// construct one, so its length always equals `kind.arity()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    kind: PredictorKind,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn new(kind: PredictorKind, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), kind.arity());
        Self { kind, values }
    }

    pub fn kind(&self) -> PredictorKind {
        self.kind
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.kind
            .feature_names()
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }
}

/// Raw inputs of one predictor: parsed from loose fields, validated, then encoded.
pub trait FeatureBuilder: Sized {
    const KIND: PredictorKind;

    /// Parse every raw field to its declared type. Range checks happen in [`build`].
    ///
    /// [`build`]: FeatureBuilder::build
    fn from_fields<S: FieldSource + ?Sized>(source: &S) -> Result<Self>;

    /// Validate ranges and encode in training order, recomputing derived features.
    fn build(&self) -> Result<FeatureVector>;
}

/// Discrete label produced by thresholding a prediction.
pub trait Tier: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Stable code, e.g. `HIGH_DELAY_RISK`.
    fn code(&self) -> &'static str;
    /// Human readable name, e.g. `High delay risk`.
    fn title(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult<T> {
    pub scalar: f64,
    pub tier: T,
    pub recommendation: &'static str,
}

impl<T: Tier> PredictionResult<T> {
    pub fn summary(&self, kind: PredictorKind) -> PredictionSummary {
        PredictionSummary {
            kind,
            scalar: self.scalar,
            tier: self.tier.code(),
            tier_title: self.tier.title(),
            recommendation: self.recommendation,
        }
    }
}

/// Tier-erased result, what the front-ends render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub kind: PredictorKind,
    pub scalar: f64,
    pub tier: &'static str,
    pub tier_title: &'static str,
    pub recommendation: &'static str,
}

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("model invocation failed: {0}")]
    ModelInvocation(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput { field, reason: reason.into() }
    }

    /// The offending field of an `InvalidInput`.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in PredictorKind::ALL {
            assert_eq!(kind.as_str().parse::<PredictorKind>().unwrap(), kind);
        }
        assert_eq!(" CLV ".parse::<PredictorKind>().unwrap(), PredictorKind::Clv);
        let err = "weather".parse::<PredictorKind>().unwrap_err();
        assert_eq!(err.field(), Some("kind"));
    }

    #[test]
    fn arities_match_schemas() {
        assert_eq!(PredictorKind::Footfall.arity(), 5);
        assert_eq!(PredictorKind::Delivery.arity(), 6);
        assert_eq!(PredictorKind::Clv.arity(), 8);
    }

    #[test]
    fn derived_features_are_not_input_fields() {
        let footfall: Vec<_> =
            PredictorKind::Footfall.input_fields().iter().map(|f| f.name).collect();
        assert!(!footfall.contains(&"is_weekend"));
        let clv: Vec<_> = PredictorKind::Clv.input_fields().iter().map(|f| f.name).collect();
        assert!(!clv.contains(&"loyalty_index"));
        assert!(!clv.contains(&"monetary_value"));
    }

    #[test]
    fn invalid_input_message_names_field() {
        let err = CoreError::invalid("month", "must be between 1 and 12, got 13");
        assert_eq!(err.to_string(), "invalid input for month: must be between 1 and 12, got 13");
        assert!(err.is_invalid_input());
    }
}
