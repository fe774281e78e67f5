//! Prediction-to-insight pipeline.
//!
//! Modules are laid out along the data flow: `features` turns the request
//! payload into a vector, `model` scores it, `classify` and `explain` shape
//! the model output, `insight` and `chart` derive the dashboard artifacts.

pub mod chart;
pub mod classify;
pub mod explain;
pub mod features;
pub mod insight;
pub mod model;

/// Round to two decimals, away from zero on halves.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to three decimals.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
