//! Feature Schema - the clinical feature layout the classifier was trained on
//!
//! The runtime schema always comes from the model artifact; the layout here
//! is the canonical order the current model generation ships with and is what
//! tests and tooling build against. Feature names are the trained dataset's
//! column headers verbatim, spelling quirks included.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// CANONICAL LAYOUT
// ============================================================================

/// Clinical feature names in the exact order the classifier expects them.
pub const DEFAULT_FEATURE_LAYOUT: &[&str] = &[
    "Age",
    "Gender",
    "Air Pollution",
    "Alcohol use",
    "Dust Allergy",
    "OccuPational Hazards",
    "Genetic Risk",
    "chronic Lung Disease",
    "Balanced Diet",
    "Obesity",
    "Smoking",
    "Years of Smoking",
    "Passive Smoker",
    "Chest Pain",
    "Coughing of Blood",
    "Fatigue",
    "Weight Loss",
    "Shortness of Breath",
    "Wheezing",
    "Swallowing Difficulty",
    "Clubbing of Finger Nails",
    "Frequent Cold",
    "Dry Cough",
    "Snoring",
];

/// Number of features in the canonical layout.
pub const DEFAULT_FEATURE_COUNT: usize = 24;

/// The fixed projection of the vector persisted in patient registry records.
/// Everything except `Years of Smoking`, in registry column order.
pub const REGISTRY_FEATURES: &[&str] = &[
    "Age",
    "Gender",
    "Air Pollution",
    "Alcohol use",
    "Dust Allergy",
    "OccuPational Hazards",
    "Genetic Risk",
    "chronic Lung Disease",
    "Balanced Diet",
    "Obesity",
    "Smoking",
    "Passive Smoker",
    "Chest Pain",
    "Coughing of Blood",
    "Fatigue",
    "Weight Loss",
    "Shortness of Breath",
    "Wheezing",
    "Swallowing Difficulty",
    "Clubbing of Finger Nails",
    "Frequent Cold",
    "Dry Cough",
    "Snoring",
];

// ============================================================================
// CLIENT FIELD MAP
// ============================================================================

/// Clinical feature name -> dashboard request field name.
///
/// The dashboard sends camelCase fields; the model schema uses the trained
/// dataset's column names. Features with bespoke extraction rules (smoking
/// block, flags) are still listed so the map stays a complete audit of the
/// client contract.
pub static CLIENT_FIELD_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Age", "age"),
        ("Gender", "gender"),
        ("Smoking", "smokingIntensity"),
        ("Years of Smoking", "yearsOfSmoking"),
        ("Passive Smoker", "passiveSmokingLevel"),
        ("Alcohol use", "alcoholUse"),
        ("Obesity", "obesityLevel"),
        ("Balanced Diet", "balancedDiet"),
        ("Air Pollution", "airPollution"),
        ("OccuPational Hazards", "occupationalHazards"),
        ("Dust Allergy", "dustAllergy"),
        ("Genetic Risk", "geneticRisk"),
        ("chronic Lung Disease", "chronicLungDisease"),
        ("Chest Pain", "chestPain"),
        ("Coughing of Blood", "coughingBlood"),
        ("Fatigue", "fatigue"),
        ("Weight Loss", "weightLoss"),
        ("Shortness of Breath", "shortnessOfBreath"),
        ("Wheezing", "wheezing"),
        ("Swallowing Difficulty", "swallowingDifficulty"),
        ("Clubbing of Finger Nails", "clubbingFingers"),
        ("Frequent Cold", "frequentColds"),
        ("Dry Cough", "dryCough"),
        ("Snoring", "snoring"),
    ])
});

/// Look up the client field name for a clinical feature, if it has one.
pub fn client_field(feature: &str) -> Option<&'static str> {
    CLIENT_FIELD_MAP.get(feature).copied()
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Error when a loaded feature schema is unusable.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("feature schema is empty")]
    Empty,
    #[error("duplicate feature in schema: {0}")]
    Duplicate(String),
}

/// Ordered feature schema, fixed at artifact load time.
///
/// Wraps the artifact's feature list with an index for O(1) name lookup.
/// Validated once at construction; immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    names: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Build a schema from an ordered name list, rejecting empty or
    /// duplicated layouts.
    pub fn new(names: Vec<String>) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(SchemaError::Duplicate(name.clone()));
            }
        }
        Ok(Self { names, index })
    }

    /// The canonical layout the current model generation ships with.
    pub fn default_layout() -> Self {
        Self::new(DEFAULT_FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect())
            .expect("canonical layout is valid")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Feature names in schema order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a feature in the schema, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name at a schema position.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Features with no client field mapping; these always take the
    /// schema default value. Surfaced once at load time for auditability.
    pub fn unmapped_features(&self) -> Vec<&str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| client_field(name).is_none())
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
