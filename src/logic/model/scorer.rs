//! Multinomial Additive Scorer
//!
//! The bundled classifier: one bias and one weight row per class, class
//! margins softmaxed into probabilities, argmax as the class code. Because
//! the margin is linear in the features, exact per-feature attribution falls
//! out as weight times distance-from-training-mean, with the margin at the
//! training means as the class baseline.

use ndarray::{Array1, Array2};

use crate::logic::features::vector::FeatureVector;
use super::artifact::{ArtifactError, ModelArtifact};
use super::labels::RiskLevel;
use super::{Attribution, AttributionError, InferenceError, RiskClassifier, RiskExplainer};

#[derive(Debug, Clone)]
pub struct MultinomialScorer {
    classes: Vec<RiskLevel>,
    bias: Vec<f64>,
    /// One row per class, aligned with `classes`.
    weights: Array2<f64>,
    means: Vec<f64>,
}

impl MultinomialScorer {
    /// Build from a validated artifact.
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self, ArtifactError> {
        artifact.validate()?;
        let classes = artifact.class_levels()?;
        let features = artifact.features.len();
        let flat: Vec<f64> = artifact.weights.iter().flatten().copied().collect();
        let weights = Array2::from_shape_vec((classes.len(), features), flat)
            .map_err(|e| ArtifactError::Shape(e.to_string()))?;
        Ok(Self {
            classes,
            bias: artifact.bias.clone(),
            weights,
            means: artifact.feature_means.clone(),
        })
    }

    pub fn feature_count(&self) -> usize {
        self.weights.ncols()
    }

    fn check_input(&self, vector: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        if vector.len() != self.feature_count() {
            return Err(InferenceError::Shape {
                expected: self.feature_count(),
                got: vector.len(),
            });
        }
        Ok(vector.to_f64())
    }

    /// Class margins for one input, in class-code order.
    fn margins(&self, x: &[f64]) -> Vec<f64> {
        self.weights
            .rows()
            .into_iter()
            .zip(&self.bias)
            .map(|(row, b)| b + row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>())
            .collect()
    }
}

/// Numerically stable softmax.
fn softmax(margins: &[f64]) -> Vec<f64> {
    let max = margins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = margins.iter().map(|m| (m - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Index of the largest value; first wins on ties.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

impl RiskClassifier for MultinomialScorer {
    fn classes(&self) -> &[RiskLevel] {
        &self.classes
    }

    fn predict(&self, vector: &FeatureVector) -> Result<i64, InferenceError> {
        let x = self.check_input(vector)?;
        Ok(argmax(&self.margins(&x)) as i64)
    }

    fn predict_proba(&self, vector: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        let x = self.check_input(vector)?;
        Ok(softmax(&self.margins(&x)))
    }
}

impl RiskExplainer for MultinomialScorer {
    fn explain(&self, vector: &FeatureVector) -> Result<Attribution, AttributionError> {
        if vector.len() != self.feature_count() {
            return Err(AttributionError::Shape {
                expected: self.feature_count(),
                got: vector.len(),
            });
        }
        let x = Array1::from_vec(vector.to_f64());
        let deltas = &x - &Array1::from_vec(self.means.clone());

        let mut contributions = self.weights.clone();
        for mut row in contributions.rows_mut() {
            row.zip_mut_with(&deltas, |w, d| *w *= d);
        }

        let expected: Vec<f64> = self
            .weights
            .rows()
            .into_iter()
            .zip(&self.bias)
            .map(|(row, b)| b + row.iter().zip(&self.means).map(|(w, m)| w * m).sum::<f64>())
            .collect();

        Ok(Attribution::new(contributions, expected))
    }
}

// ============================================================================
// TESTS
// ============================================================================
