//! Model Artifact - serialized coefficients of the trained classifier
//!
//! The artifact is a JSON export of the offline training run: the feature
//! schema, the fitted class order, per-class bias and weight rows and the
//! training-set feature means the explainer baselines against. Everything is
//! validated once at load; the running service never re-checks shapes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::features::schema::{FeatureSchema, SchemaError};
use super::labels::RiskLevel;

/// Artifact format revision this build can read.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;
/// The only scoring algorithm currently shipped.
pub const ALGORITHM_MULTINOMIAL: &str = "multinomial-additive";

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot read model artifact at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported artifact schema version {0}")]
    UnsupportedVersion(u32),
    #[error("unsupported scoring algorithm '{0}'")]
    UnsupportedAlgorithm(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("artifact classes must name Low, Medium and High exactly once each, got {0:?}")]
    BadClasses(Vec<String>),
    #[error("artifact shape mismatch: {0}")]
    Shape(String),
}

// ============================================================================
// ARTIFACT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    pub algorithm: String,
    pub trained_at: String,
    /// Feature names in training column order.
    pub features: Vec<String>,
    /// Fitted class labels; row order for `bias` and `weights`, and the
    /// decoder for raw class codes.
    pub classes: Vec<String>,
    pub bias: Vec<f64>,
    /// One weight row per class, one column per feature.
    pub weights: Vec<Vec<f64>>,
    /// Training-set mean per feature, the explainer baseline.
    pub feature_means: Vec<f64>,
}

impl ModelArtifact {
    /// Read and validate an artifact file.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let text = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&text)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Shape and vocabulary checks. Runs once at load so the scorer can
    /// index rows and columns unchecked-by-construction afterwards.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(ArtifactError::UnsupportedVersion(self.schema_version));
        }
        if self.algorithm != ALGORITHM_MULTINOMIAL {
            return Err(ArtifactError::UnsupportedAlgorithm(self.algorithm.clone()));
        }

        self.class_levels()?;
        let features = self.features.len();
        let classes = self.classes.len();

        if features == 0 {
            return Err(ArtifactError::Schema(SchemaError::Empty));
        }
        if self.bias.len() != classes {
            return Err(ArtifactError::Shape(format!(
                "{} bias terms for {} classes",
                self.bias.len(),
                classes
            )));
        }
        if self.weights.len() != classes {
            return Err(ArtifactError::Shape(format!(
                "{} weight rows for {} classes",
                self.weights.len(),
                classes
            )));
        }
        for (i, row) in self.weights.iter().enumerate() {
            if row.len() != features {
                return Err(ArtifactError::Shape(format!(
                    "weight row {} has {} columns for {} features",
                    i,
                    row.len(),
                    features
                )));
            }
        }
        if self.feature_means.len() != features {
            return Err(ArtifactError::Shape(format!(
                "{} feature means for {} features",
                self.feature_means.len(),
                features
            )));
        }
        Ok(())
    }

    /// The ordered feature schema this model was trained on.
    pub fn schema(&self) -> Result<FeatureSchema, ArtifactError> {
        Ok(FeatureSchema::new(self.features.clone())?)
    }

    /// Fitted classes decoded to risk tiers, requiring each tier exactly
    /// once. The fitted order is authoritative for code decoding; it is not
    /// assumed to match the ordinal Low/Medium/High order.
    pub fn class_levels(&self) -> Result<Vec<RiskLevel>, ArtifactError> {
        let bad = || ArtifactError::BadClasses(self.classes.clone());
        if self.classes.len() != RiskLevel::ALL.len() {
            return Err(bad());
        }
        let mut levels = Vec::with_capacity(self.classes.len());
        for label in &self.classes {
            let level = RiskLevel::from_label(label).ok_or_else(bad)?;
            if levels.contains(&level) {
                return Err(bad());
            }
            levels.push(level);
        }
        Ok(levels)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::schema::DEFAULT_FEATURE_LAYOUT;
    use std::path::PathBuf;

    fn bundled_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("model/lung_model.json")
    }

    fn bundled() -> ModelArtifact {
        ModelArtifact::load(&bundled_path()).unwrap()
    }

    #[test]
    fn bundled_artifact_loads_and_validates() {
        let artifact = bundled();
        assert_eq!(artifact.schema_version, SUPPORTED_SCHEMA_VERSION);
        assert_eq!(artifact.algorithm, ALGORITHM_MULTINOMIAL);
        assert_eq!(artifact.features.len(), DEFAULT_FEATURE_LAYOUT.len());
    }

    #[test]
    fn bundled_schema_matches_canonical_layout() {
        let schema = bundled().schema().unwrap();
        let expected: Vec<&str> = DEFAULT_FEATURE_LAYOUT.to_vec();
        let got: Vec<&str> = schema.names().iter().map(String::as_str).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn bundled_classes_are_a_fitted_permutation() {
        let levels = bundled().class_levels().unwrap();
        assert_eq!(levels.len(), 3);
        for level in RiskLevel::ALL {
            assert!(levels.contains(&level));
        }
        // Alphabetical fit order, not ordinal order.
        assert_eq!(levels[0], RiskLevel::High);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ModelArtifact::load(Path::new("/nonexistent/model.json")).unwrap_err();
        match err {
            ArtifactError::Read { path, .. } => assert!(path.contains("nonexistent")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_version() {
        let mut artifact = bundled();
        artifact.schema_version = 99;
        assert!(matches!(
            artifact.validate(),
            Err(ArtifactError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let mut artifact = bundled();
        artifact.algorithm = "gradient-boost".into();
        assert!(matches!(
            artifact.validate(),
            Err(ArtifactError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn rejects_duplicate_classes() {
        let mut artifact = bundled();
        artifact.classes = vec!["Low".into(), "Low".into(), "High".into()];
        assert!(matches!(artifact.validate(), Err(ArtifactError::BadClasses(_))));
    }

    #[test]
    fn rejects_ragged_weight_rows() {
        let mut artifact = bundled();
        artifact.weights[1].pop();
        assert!(matches!(artifact.validate(), Err(ArtifactError::Shape(_))));
    }
}
