//! Risk Classification - from raw model output to a labeled prediction
//!
//! Wraps one classifier call: decode the class code through the fitted
//! classes, take the top probability as the confidence percentage, and pin
//! down the class index later stages use to slice probability and
//! attribution rows.

use crate::logic::features::vector::FeatureVector;
use crate::logic::model::labels::RiskLevel;
use crate::logic::model::{InferenceError, RiskClassifier};
use crate::logic::round2;

/// One classified input.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: RiskLevel,
    /// Top class probability as a percentage, two decimals.
    pub confidence: f64,
    /// Row index for probability and attribution lookups.
    pub class_index: usize,
}

/// Classify one feature vector.
pub fn classify(
    classifier: &dyn RiskClassifier,
    vector: &FeatureVector,
) -> Result<Classification, InferenceError> {
    let code = classifier.predict(vector)?;
    let classes = classifier.classes();
    let label = usize::try_from(code)
        .ok()
        .and_then(|i| classes.get(i))
        .copied()
        .ok_or(InferenceError::UnknownClassCode(code))?;

    let probabilities = classifier.predict_proba(vector)?;
    let top = probabilities.iter().copied().fold(0.0_f64, f64::max);
    let confidence = round2(top * 100.0);

    // The code is the index when it fits the probability vector; a code the
    // probabilities do not cover falls back to the label's ordinal position.
    let class_index = usize::try_from(code)
        .ok()
        .filter(|i| *i < probabilities.len())
        .unwrap_or_else(|| label.ordinal());

    Ok(Classification { label, confidence, class_index })
}
