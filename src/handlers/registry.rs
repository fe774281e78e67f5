//! Patient registry handler

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::state::AppState;
use crate::storage::history::RegistryRecord;

/// Read back every prediction on file.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<RegistryRecord>>> {
    Ok(Json(state.registry.read_all()?))
}
