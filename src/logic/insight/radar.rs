//! Radar Series - lifestyle snapshot for the dashboard's radar chart
//!
//! Five fixed lifestyle features, each rescaled against its nominal maximum
//! to a 0-100 axis. Raw inputs are not range-validated upstream, so values
//! are clamped to the axis at both ends.

use serde::Serialize;

use crate::logic::features::schema::FeatureSchema;
use crate::logic::features::vector::FeatureVector;

/// Radar axes and the nominal maximum for each.
pub const RADAR_AXES: [(&str, f64); 5] = [
    ("Smoking", 8.0),
    ("Alcohol use", 8.0),
    ("Obesity", 7.0),
    ("Balanced Diet", 7.0),
    ("Air Pollution", 8.0),
];

#[derive(Debug, Clone, Serialize)]
pub struct RadarSeries {
    pub labels: Vec<&'static str>,
    pub data: Vec<f64>,
}

/// Build the radar series for one vector.
pub fn radar_series(schema: &FeatureSchema, vector: &FeatureVector) -> RadarSeries {
    let mut labels = Vec::with_capacity(RADAR_AXES.len());
    let mut data = Vec::with_capacity(RADAR_AXES.len());
    for (name, max) in RADAR_AXES {
        let value = vector.value(schema, name).unwrap_or(0) as f64;
        labels.push(name);
        data.push(((value / max) * 100.0).clamp(0.0, 100.0));
    }
    RadarSeries { labels, data }
}
