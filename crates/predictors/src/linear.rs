use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::Model;

/// Ordinary least squares: `intercept + Σ coefficients[i] * x[i]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl Model for LinearModel {
    fn arity(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        ensure!(
            features.len() == self.coefficients.len(),
            "linear model has {} coefficients, got {} features",
            self.coefficients.len(),
            features.len()
        );
        Ok(self
            .coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (w, x)| acc + w * x))
    }
}
