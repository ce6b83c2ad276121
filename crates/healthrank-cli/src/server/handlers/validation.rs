//! Validation report handler.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Flattened per-check summary of the startup validation run.
pub async fn get_validation(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let report = state.service.report().ok_or_else(|| ApiError::NotFound {
        message: "No validation report available".to_string(),
        details: json!({ "resource_type": "validation_report" }),
    })?;

    Ok(Json(json!({
        "is_valid": report.is_valid(),
        "error_count": report.error_count(),
        "warning_count": report.warning_count(),
        "checks": report.summary(),
    })))
}
