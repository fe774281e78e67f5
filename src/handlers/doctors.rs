//! Doctor lookup handler

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::logic::model::labels::RiskLevel;
use crate::state::AppState;
use crate::storage::doctors::Doctor;

#[derive(Debug, Deserialize)]
pub struct DoctorQuery {
    risk: Option<String>,
}

/// List doctors matched to a risk tier's specialist fields. A missing or
/// unrecognized tier returns the whole roster.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DoctorQuery>,
) -> Json<Vec<Doctor>> {
    let targets = query
        .risk
        .as_deref()
        .and_then(RiskLevel::from_label)
        .map(|level| level.specialist_targets())
        .unwrap_or(&[]);

    Json(state.doctors.with_specialties(targets))
}
