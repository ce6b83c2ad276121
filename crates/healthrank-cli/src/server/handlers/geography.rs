//! State and county discovery handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use healthrank::service::County;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Sorted list of state names.
pub async fn get_states(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.service.states())
}

/// Counties of a state, matched case-insensitively.
pub async fn get_counties_by_state(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<County>>, ApiError> {
    Ok(Json(state.service.counties_by_state(&name)?))
}
