//! HTTP handlers

pub mod booking;
pub mod chat;
pub mod doctors;
pub mod health;
pub mod predict;
pub mod registry;

use serde_json::{Map, Value};

use crate::error::AppError;

/// Unwrap an optional JSON body into the flat object every POST route
/// expects. Absent bodies, nulls and non-objects all read as "no data".
pub(crate) fn require_object(body: Option<Value>) -> Result<Map<String, Value>, AppError> {
    match body {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(AppError::NoInput),
    }
}
