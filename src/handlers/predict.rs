//! Prediction handler
//!
//! The one route with real logic behind it. Runs the pipeline end to end:
//! normalize the payload, classify, compose the insight artifacts, rank
//! attribution for the predicted class, then bolt on the two best-effort
//! steps (chart render, registry append) that are allowed to fail without
//! touching the response.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::logic::chart::{self, RenderError};
use crate::logic::classify::{classify, Classification};
use crate::logic::explain::{rank, Ranking};
use crate::logic::features::normalize::normalize;
use crate::logic::insight::diet::DietProtocol;
use crate::logic::insight::radar::RadarSeries;
use crate::logic::insight::{compose, Insights};
use crate::logic::round3;
use crate::state::AppState;
use crate::storage::history::RegistryRecord;

#[derive(Serialize)]
pub struct PredictResponse {
    prediction: &'static str,
    confidence: f64,
    diet: &'static DietProtocol,
    recommendations: Vec<String>,
    plot_url: String,
    dashboard: Dashboard,
}

#[derive(Serialize)]
struct Dashboard {
    radar: RadarSeries,
    bar: BarSeries,
    base_value: f64,
}

/// Top attribution magnitudes, largest first, impacts at three decimals.
#[derive(Serialize)]
struct BarSeries {
    labels: Vec<String>,
    data: Vec<f64>,
}

pub async fn predict(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> AppResult<Json<PredictResponse>> {
    let bundle = state.model.clone().ok_or(AppError::ModelUnavailable)?;
    let payload = super::require_object(body.map(|Json(v)| v))?;

    let vector = normalize(&bundle.schema, &payload)?;
    let Classification { label, confidence, class_index } =
        classify(bundle.classifier.as_ref(), &vector)?;
    info!(%label, confidence, "prediction computed");

    let Insights { diet, recommendations, radar } = compose(&bundle.schema, &vector, label);
    let ranking: Ranking = rank(bundle.explainer.as_ref(), &bundle.schema, &vector, class_index);

    let plot_url = match chart::impact_chart_png(&ranking.top_by_magnitude) {
        Ok(png) => png,
        Err(RenderError::Empty) => {
            debug!("no attribution to chart, sending empty plot");
            String::new()
        }
        Err(e) => {
            warn!(error = %e, "impact chart failed, sending empty plot");
            String::new()
        }
    };

    // Registry append is audit trail, not response material; a write failure
    // is logged and the caller never learns of it.
    let record = RegistryRecord::compose(
        patient_name(&payload),
        label,
        confidence,
        &bundle.schema,
        &vector,
    );
    if let Err(e) = state.registry.append(&record) {
        warn!(error = %e, "patient registry append failed");
    }

    let bar = BarSeries {
        labels: ranking.top_by_magnitude.iter().map(|i| i.name.clone()).collect(),
        data: ranking
            .top_by_magnitude
            .iter()
            .map(|i| round3(i.impact))
            .collect(),
    };

    Ok(Json(PredictResponse {
        prediction: label.as_str(),
        confidence,
        diet,
        recommendations,
        plot_url,
        dashboard: Dashboard { radar, bar, base_value: ranking.baseline },
    }))
}

fn patient_name(payload: &Map<String, Value>) -> &str {
    payload
        .get("patientName")
        .or_else(|| payload.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("Anonymous")
}
