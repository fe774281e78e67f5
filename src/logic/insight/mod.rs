//! Insight Composition
//!
//! Everything derived from the normalized vector and the risk label without
//! touching the model again: the diet card, the recommendation list and the
//! radar series.

pub mod diet;
pub mod radar;
pub mod recommend;

use crate::logic::features::schema::FeatureSchema;
use crate::logic::features::vector::FeatureVector;
use crate::logic::model::labels::RiskLevel;
use diet::DietProtocol;
use radar::RadarSeries;

/// Composed, human-facing insight for one prediction.
pub struct Insights {
    pub diet: &'static DietProtocol,
    pub recommendations: Vec<String>,
    pub radar: RadarSeries,
}

/// Derive all insight artifacts for one classified vector.
pub fn compose(schema: &FeatureSchema, vector: &FeatureVector, label: RiskLevel) -> Insights {
    Insights {
        diet: diet::protocol_for(label),
        recommendations: recommend::recommendations(schema, vector),
        radar: radar::radar_series(schema, vector),
    }
}
