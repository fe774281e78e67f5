//! Model layer: artifact loading, the scoring/attribution seams and the
//! bundled multinomial implementation.
//!
//! Handlers only ever see the two traits here. The bundled scorer satisfies
//! both; tests substitute failing or fixed implementations at the same seam.

pub mod artifact;
pub mod labels;
pub mod scorer;

use std::path::Path;

use ndarray::{Array2, ArrayView1};

use crate::logic::features::schema::FeatureSchema;
use crate::logic::features::vector::FeatureVector;
use artifact::{ArtifactError, ModelArtifact};
use labels::RiskLevel;
use scorer::MultinomialScorer;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("feature vector length {got} does not match model schema length {expected}")]
    Shape { expected: usize, got: usize },
    #[error("classifier produced class code {0} outside the fitted classes")]
    UnknownClassCode(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum AttributionError {
    #[error("feature vector length {got} does not match model schema length {expected}")]
    Shape { expected: usize, got: usize },
    #[error("attribution failed: {0}")]
    Failed(String),
}

// ============================================================================
// ATTRIBUTION OUTPUT
// ============================================================================

/// Per-class, per-feature signed contributions plus per-class baselines.
///
/// Row `c`, column `f` is how far feature `f` pushed the score for class `c`
/// away from that class's baseline on this input. Baseline plus the row sum
/// reconstructs the class margin.
#[derive(Debug, Clone)]
pub struct Attribution {
    contributions: Array2<f64>,
    expected: Vec<f64>,
}

impl Attribution {
    pub fn new(contributions: Array2<f64>, expected: Vec<f64>) -> Self {
        debug_assert_eq!(contributions.nrows(), expected.len());
        Self { contributions, expected }
    }

    pub fn class_count(&self) -> usize {
        self.contributions.nrows()
    }

    pub fn feature_count(&self) -> usize {
        self.contributions.ncols()
    }

    /// Contribution row for one class.
    pub fn class_row(&self, class: usize) -> Option<ArrayView1<'_, f64>> {
        if class < self.contributions.nrows() {
            Some(self.contributions.row(class))
        } else {
            None
        }
    }

    /// Baseline (expected) value for one class.
    pub fn expected_value(&self, class: usize) -> Option<f64> {
        self.expected.get(class).copied()
    }
}

// ============================================================================
// MODEL SEAMS
// ============================================================================

/// Scoring side of the trained model.
pub trait RiskClassifier: Send + Sync {
    /// Fitted class labels in code order; doubles as the label decoder.
    fn classes(&self) -> &[RiskLevel];

    /// Raw class code for one input.
    fn predict(&self, vector: &FeatureVector) -> Result<i64, InferenceError>;

    /// Per-class probabilities, aligned with `classes()`.
    fn predict_proba(&self, vector: &FeatureVector) -> Result<Vec<f64>, InferenceError>;
}

/// Explanation side of the trained model.
pub trait RiskExplainer: Send + Sync {
    fn explain(&self, vector: &FeatureVector) -> Result<Attribution, AttributionError>;
}

// ============================================================================
// BUNDLE
// ============================================================================

/// Everything loaded from one artifact: the schema requests are normalized
/// against, the classifier and the explainer. Loaded once at startup and
/// shared read-only across requests.
pub struct ModelBundle {
    pub schema: FeatureSchema,
    pub classifier: Box<dyn RiskClassifier>,
    pub explainer: Box<dyn RiskExplainer>,
    pub trained_at: String,
}

impl ModelBundle {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact = ModelArtifact::load(path)?;
        Self::from_artifact(&artifact)
    }

    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self, ArtifactError> {
        let schema = artifact.schema()?;
        let scorer = MultinomialScorer::from_artifact(artifact)?;
        Ok(Self {
            schema,
            classifier: Box::new(scorer.clone()),
            explainer: Box::new(scorer),
            trained_at: artifact.trained_at.clone(),
        })
    }
}
