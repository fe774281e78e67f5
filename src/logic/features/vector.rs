//! Feature Vector - normalized clinical levels in schema order
//!
//! Values are integral by construction (normalization coerces every client
//! field to a whole clinical level) and are widened to f64 only at the model
//! boundary.

use serde::{Deserialize, Serialize};

use super::schema::FeatureSchema;

/// Error when assembling a vector against a schema.
#[derive(Debug, thiserror::Error)]
pub enum VectorError {
    #[error("feature vector length {got} does not match schema length {expected}")]
    LengthMismatch { expected: usize, got: usize },
}

/// One patient's normalized features, positionally aligned with a
/// [`FeatureSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<i64>,
}

impl FeatureVector {
    /// Wrap normalized values, enforcing schema alignment.
    pub fn from_values(schema: &FeatureSchema, values: Vec<i64>) -> Result<Self, VectorError> {
        if values.len() != schema.len() {
            return Err(VectorError::LengthMismatch {
                expected: schema.len(),
                got: values.len(),
            });
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a schema position.
    pub fn get(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    /// Value of a named feature. Rule evaluation reads the vector this way
    /// so it survives schema reordering across model generations.
    pub fn value(&self, schema: &FeatureSchema, name: &str) -> Option<i64> {
        schema.index_of(name).and_then(|i| self.get(i))
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Widen to f64 for model math.
    pub fn to_f64(&self) -> Vec<f64> {
        self.values.iter().map(|v| *v as f64).collect()
    }
}
