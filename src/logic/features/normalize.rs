//! Input Normalization - dashboard payload to clinical feature vector
//!
//! The dashboard sends a flat JSON object of camelCase fields. Normalization
//! resolves every schema feature from it in one pass: coercing levels,
//! encoding gender, gating the smoking block behind the smoker flag and
//! expanding yes/no risk flags to clinical levels. Missing fields fall back
//! to baseline values so a sparse payload still produces a full vector.

use serde_json::{Map, Value};

use super::schema::{client_field, FeatureSchema};
use super::vector::{FeatureVector, VectorError};

/// Baseline level for any feature the payload does not answer.
pub const DEFAULT_LEVEL: i64 = 1;
/// Assumed age when the payload omits it.
pub const DEFAULT_AGE: i64 = 30;
/// Level a set yes/no risk flag expands to.
pub const ELEVATED_FLAG_LEVEL: i64 = 7;

const GENDER_MALE: i64 = 1;
const GENDER_FEMALE: i64 = 2;

/// Error for a payload field that cannot be coerced to a clinical level.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Invalid value for field '{field}': expected a whole number, got {got}")]
    BadField { field: String, got: String },
    #[error(transparent)]
    Vector(#[from] VectorError),
}

/// Resolve a full feature vector from a dashboard payload.
pub fn normalize(schema: &FeatureSchema, payload: &Map<String, Value>) -> Result<FeatureVector, NormalizeError> {
    let is_smoker = is_set(payload.get("isSmoker"));

    let mut values = Vec::with_capacity(schema.len());
    for name in schema.names() {
        let value = match name.as_str() {
            "Age" => level_or(payload, "age", DEFAULT_AGE)?,
            // Exact lowercase "male" is the only male encoding; every other
            // value, absent included, reads as female.
            "Gender" => match payload.get("gender") {
                Some(Value::String(s)) if s == "male" => GENDER_MALE,
                _ => GENDER_FEMALE,
            },
            // Smoking intensity and history only count for self-reported
            // smokers; otherwise they are pinned to baseline.
            "Smoking" => {
                if is_smoker {
                    level_or(payload, "smokingIntensity", DEFAULT_LEVEL)?
                } else {
                    DEFAULT_LEVEL
                }
            }
            "Years of Smoking" => {
                if is_smoker {
                    level_or(payload, "yearsOfSmoking", 0)?
                } else {
                    0
                }
            }
            "Genetic Risk" => flag_level(payload.get("geneticRisk")),
            "chronic Lung Disease" => flag_level(payload.get("chronicLungDisease")),
            other => match client_field(other) {
                Some(field) => level_or(payload, field, DEFAULT_LEVEL)?,
                None => DEFAULT_LEVEL,
            },
        };
        values.push(value);
    }

    Ok(FeatureVector::from_values(schema, values)?)
}

/// Coerce a payload field to a whole clinical level, falling back when the
/// field is absent or null.
fn level_or(payload: &Map<String, Value>, field: &str, default: i64) -> Result<i64, NormalizeError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => coerce_level(field, value),
    }
}

/// Whole-number coercion: integers pass through, floats truncate toward
/// zero, numeric strings parse, booleans count as 0/1. Anything else is a
/// client error naming the field.
fn coerce_level(field: &str, value: &Value) -> Result<i64, NormalizeError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64() {
                Ok(f.trunc() as i64)
            } else {
                Err(bad_field(field, value))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| bad_field(field, value)),
        Value::Bool(b) => Ok(i64::from(*b)),
        _ => Err(bad_field(field, value)),
    }
}

fn bad_field(field: &str, value: &Value) -> NormalizeError {
    NormalizeError::BadField {
        field: field.to_string(),
        got: value.to_string(),
    }
}

/// Expand a yes/no risk flag to its clinical level. Absent, null, false,
/// zero and empty-string answers are unset; any other value counts as set.
fn flag_level(value: Option<&Value>) -> i64 {
    if is_set(value) {
        ELEVATED_FLAG_LEVEL
    } else {
        DEFAULT_LEVEL
    }
}

fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
