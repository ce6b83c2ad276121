//! Indicator discovery handler.

use axum::{extract::State, Json};
use healthrank::service::IndicatorInfo;

use crate::server::state::AppState;

/// Published indicators, sorted by id.
pub async fn get_indicators(State(state): State<AppState>) -> Json<Vec<IndicatorInfo>> {
    Json(state.service.indicators())
}
