//! LungVision Backend Server
//!
//! Decision-support backend for the LungVision dashboard: lung cancer risk
//! prediction with per-feature attribution, derived guidance and the small
//! clinic surface around it (doctors, bookings, records, FAQ chat).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     LUNGVISION BACKEND                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────────────────────────────────────┐ │
//! │  │  API     │   │  Prediction Pipeline                     │ │
//! │  │  (Axum)  │──▶│  normalize ▶ classify ▶ insight ▶ rank   │ │
//! │  └────┬─────┘   └────────────────────┬─────────────────────┘ │
//! │       │                              ▼                       │
//! │       │              ┌────────────────────────────┐          │
//! │       └─────────────▶│ Flat-file stores (JSONL)   │          │
//! │                      │ registry / records / docs  │          │
//! │                      └────────────────────────────┘          │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::logic::model::ModelBundle;
use crate::state::AppState;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lungvision_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("LungVision Backend starting...");

    // Load the trained model once; the service still comes up without it and
    // rejects predictions until restarted with a readable artifact.
    let model = match ModelBundle::load(&config.model_path) {
        Ok(bundle) => {
            tracing::info!(
                path = %config.model_path.display(),
                features = bundle.schema.len(),
                trained_at = %bundle.trained_at,
                "model artifact loaded"
            );
            Some(Arc::new(bundle))
        }
        Err(e) => {
            tracing::error!(
                path = %config.model_path.display(),
                error = %e,
                "model artifact unavailable, predictions disabled"
            );
            None
        }
    };

    let state = AppState::new(model, &config);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::check))
        .route("/api/predict", post(handlers::predict::predict))
        .route("/api/doctors", get(handlers::doctors::list))
        .route("/api/book", post(handlers::booking::book))
        .route("/api/hospital-records", get(handlers::booking::hospital_records))
        .route("/api/registry", get(handlers::registry::list))
        .route("/api/chat", post(handlers::chat::reply))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_config(dir: &TempDir) -> config::Config {
        config::Config {
            port: 0,
            data_dir: dir.path().to_path_buf(),
            model_path: bundled_model_path(),
        }
    }

    fn bundled_model_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("model/lung_model.json")
    }

    fn app_with_model(dir: &TempDir) -> Router {
        let bundle = ModelBundle::load(&bundled_model_path()).unwrap();
        create_router(AppState::new(Some(Arc::new(bundle)), &test_config(dir)))
    }

    fn app_without_model(dir: &TempDir) -> Router {
        create_router(AppState::new(None, &test_config(dir)))
    }

    async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read_json(response).await
    }

    async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::post(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        read_json(response).await
    }

    async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reflects_model_presence() {
        let dir = TempDir::new().unwrap();

        let (status, body) = get_json(&app_with_model(&dir), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model_loaded"], true);
        assert!(body["timestamp"].as_str().unwrap().contains('T'));

        let (_, body) = get_json(&app_without_model(&dir), "/api/health").await;
        assert_eq!(body["model_loaded"], false);
    }

    #[tokio::test]
    async fn predict_without_model_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = app_without_model(&dir);

        let (status, body) = post_json(&app, "/api/predict", json!({"age": 45})).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Model not loaded on server");
    }

    #[tokio::test]
    async fn predict_without_a_body_is_a_client_error() {
        let dir = TempDir::new().unwrap();
        let app = app_with_model(&dir);

        let response = app
            .clone()
            .oneshot(Request::post("/api/predict").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let (status, body) = read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No data provided");

        let (status, _) = post_json(&app, "/api/predict", json!([1, 2, 3])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn predict_names_an_uncoercible_field() {
        let dir = TempDir::new().unwrap();
        let app = app_with_model(&dir);

        let (status, body) = post_json(&app, "/api/predict", json!({"age": "forty"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("age"));
    }

    #[tokio::test]
    async fn predict_returns_the_full_dashboard_payload() {
        let dir = TempDir::new().unwrap();
        let app = app_with_model(&dir);

        let (status, body) = post_json(
            &app,
            "/api/predict",
            json!({
                "patientName": "Ravi",
                "age": 45,
                "gender": "male",
                "isSmoker": true,
                "yearsOfSmoking": 10,
                "smokingIntensity": 5
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        assert!(["Low", "Medium", "High"].contains(&body["prediction"].as_str().unwrap()));
        let confidence = body["confidence"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&confidence));

        for key in ["color", "bg", "title", "content", "plain_text"] {
            assert!(body["diet"].get(key).is_some(), "diet missing {key}");
        }

        let recs: Vec<&str> = body["recommendations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_str().unwrap())
            .collect();
        assert!(!recs.is_empty());
        // Intensity 5 with only a 10-year history: cessation nudge, no
        // screening rule.
        assert!(recs.iter().any(|r| r.contains("cessation")));
        assert!(!recs.iter().any(|r| r.contains("SCREENING")));

        // Base64 PNG payloads start with the encoded magic bytes.
        assert!(body["plot_url"].as_str().unwrap().starts_with("iVBOR"));

        let radar = &body["dashboard"]["radar"];
        assert_eq!(radar["labels"].as_array().unwrap().len(), 5);
        for value in radar["data"].as_array().unwrap() {
            let v = value.as_f64().unwrap();
            assert!((0.0..=100.0).contains(&v));
        }

        let bar = &body["dashboard"]["bar"];
        let labels = bar["labels"].as_array().unwrap();
        assert!(!labels.is_empty() && labels.len() <= 7);
        assert_eq!(labels.len(), bar["data"].as_array().unwrap().len());
        assert!(body["dashboard"]["base_value"].is_number());

        // The prediction landed in the registry.
        let (status, registry) = get_json(&app, "/api/registry").await;
        assert_eq!(status, StatusCode::OK);
        let rows = registry.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Patient Name"], "Ravi");
        assert_eq!(rows[0]["Age"], 45);
        assert_eq!(rows[0]["Smoking"], 5);
        assert_eq!(rows[0]["GenderStr"], "Male");
    }

    #[tokio::test]
    async fn urgent_hemoptysis_leads_the_recommendations() {
        let dir = TempDir::new().unwrap();
        let app = app_with_model(&dir);

        let (_, body) = post_json(&app, "/api/predict", json!({"coughingBlood": 3})).await;
        let first = body["recommendations"][0].as_str().unwrap();
        assert!(first.contains("URGENT"));
        assert!(first.contains("Hemoptysis"));
    }

    #[tokio::test]
    async fn doctors_filter_by_risk_tier() {
        let dir = TempDir::new().unwrap();
        let app = app_with_model(&dir);

        let (status, body) = get_json(&app, "/api/doctors?risk=High").await;
        assert_eq!(status, StatusCode::OK);
        let specialties: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["Specialty"].as_str().unwrap())
            .collect();
        assert_eq!(specialties, vec!["Oncologist", "Thoracic Surgeon"]);

        let (_, all) = get_json(&app, "/api/doctors").await;
        assert_eq!(all.as_array().unwrap().len(), 4);

        let (_, unknown) = get_json(&app, "/api/doctors?risk=Severe").await;
        assert_eq!(unknown.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn booking_issues_a_transaction_and_records_it() {
        let dir = TempDir::new().unwrap();
        let app = app_with_model(&dir);

        let (status, body) = post_json(
            &app,
            "/api/book",
            json!({
                "patientName": "Meera",
                "doctorName": "Dr. Arun Kumar",
                "specialty": "Oncologist",
                "amount": 500
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let txn = body["transactionId"].as_str().unwrap();
        assert!(txn.starts_with("TXN-"));

        let (_, records) = get_json(&app, "/api/hospital-records").await;
        let rows = records.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Transaction ID"], txn);
        assert_eq!(rows[0]["Payment Status"], "Payment Successful");
        assert_eq!(rows[0]["Patient Name"], "Meera");
    }

    #[tokio::test]
    async fn booking_without_a_body_is_a_client_error() {
        let dir = TempDir::new().unwrap();
        let app = app_with_model(&dir);

        let response = app
            .clone()
            .oneshot(Request::post("/api/book").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let (status, _) = read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_answers_known_topics_and_falls_back() {
        let dir = TempDir::new().unwrap();
        let app = app_with_model(&dir);

        let (status, body) =
            post_json(&app, "/api/chat", json!({"message": "How much is the fee?"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"].as_str().unwrap().contains("\u{20b9}500"));

        let (_, body) = post_json(&app, "/api/chat", json!({"message": "zzz"})).await;
        assert!(body["response"].as_str().unwrap().contains("not sure"));
    }
}
