//! Regression tree ensembles.
//!
//! Covers both random forests (trees averaged) and gradient boosted trees (leaves summed
//! on top of a base score). Trees are stored as flat node arrays in pre-order, root at
//! index 0, so every child index is greater than its parent's.

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use crate::Model;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Node {
    Split { feature: usize, threshold: f64, left: usize, right: usize },
    Leaf { value: f64 },
}

/// Comparison used at split nodes; the left branch is taken when it holds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    /// `x <= threshold` (scikit-learn).
    #[default]
    LessOrEqual,
    /// `x < threshold` (XGBoost).
    Less,
}

impl SplitRule {
    fn goes_left(self, x: f64, threshold: f64) -> bool {
        match self {
            Self::LessOrEqual => x <= threshold,
            Self::Less => x < threshold,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegressionTree {
    pub nodes: Vec<Node>,
}

impl RegressionTree {
    pub fn validate(&self, arity: usize) -> Result<()> {
        ensure!(!self.nodes.is_empty(), "tree has no nodes");
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Node::Split { feature, threshold, left, right } = *node {
                ensure!(
                    feature < arity,
                    "node {idx} splits on feature {feature}, model has {arity}"
                );
                ensure!(threshold.is_finite(), "node {idx} has a non-finite threshold");
                for child in [left, right] {
                    ensure!(
                        child > idx && child < self.nodes.len(),
                        "node {idx} points to invalid child {child}"
                    );
                }
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, features: &[f64], rule: SplitRule) -> Result<f64> {
        let mut idx = 0;
        // Children always sit after their parent, so a walk visits at most every node once.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split { feature, threshold, left, right }) => {
                    let Some(x) = features.get(*feature) else {
                        bail!("split on missing feature {feature}");
                    };
                    idx = if rule.goes_left(*x, *threshold) { *left } else { *right };
                }
                None => bail!("dangling node index {idx}"),
            }
        }
        bail!("tree walk did not reach a leaf")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest).
    Mean,
    /// `base_score` plus the sum of tree outputs (boosting).
    Sum,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeEnsemble {
    pub n_features: usize,
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub split_rule: SplitRule,
    pub trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.trees.is_empty(), "ensemble has no trees");
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| e.context(format!("tree {i}")))?;
        }
        Ok(())
    }
}

impl Model for TreeEnsemble {
    fn arity(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        ensure!(
            features.len() == self.n_features,
            "ensemble expects {} features, got {}",
            self.n_features,
            features.len()
        );
        ensure!(!self.trees.is_empty(), "ensemble has no trees");

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(features, self.split_rule)?;
        }
        Ok(match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + total,
        })
    }
}
