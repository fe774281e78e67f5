//! Booking handlers
//!
//! Books an appointment (mock payment always succeeds) and serves back the
//! hospital records trail. The record append is best-effort: the patient has
//! already "paid", so a disk hiccup must not unwind the booking.

use axum::{extract::State, Json};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::AppResult;
use crate::state::AppState;
use crate::storage::history::BookingRecord;

#[derive(Serialize)]
pub struct BookResponse {
    success: bool,
    #[serde(rename = "transactionId")]
    transaction_id: String,
}

/// Confirm a booking: issue a transaction id and append a hospital record.
pub async fn book(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> AppResult<Json<BookResponse>> {
    let payload = super::require_object(body.map(|Json(v)| v))?;

    let transaction_id = new_transaction_id();
    let record = BookingRecord::compose(&payload, &transaction_id);
    if let Err(e) = state.bookings.append(&record) {
        warn!(error = %e, transaction_id, "hospital record append failed");
    }
    info!(transaction_id, "booking confirmed");

    Ok(Json(BookResponse { success: true, transaction_id }))
}

/// Read back every booking on file.
pub async fn hospital_records(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookingRecord>>> {
    Ok(Json(state.bookings.read_all()?))
}

fn new_transaction_id() -> String {
    format!("TXN-{}", rand::thread_rng().gen_range(10000..=99999))
}
