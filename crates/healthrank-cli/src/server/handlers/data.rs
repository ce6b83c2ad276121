//! Filtered data query handler.

use axum::{
    extract::{Query, State},
    Json,
};
use healthrank::{DataQuery, Record};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Records matching `state`, `fipscode`, `indicator`, `year`, up to `limit`.
///
/// At least one filter is required.
pub async fn get_data(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.service.query(&query)?))
}
