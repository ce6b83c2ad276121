//! Health check handler.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use healthrank::service::ServiceHealth;
use serde::Serialize;

use crate::server::state::AppState;

/// Response for the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub data_service: ServiceHealth,
    pub api_version: &'static str,
}

/// API and data service status.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        data_service: state.service.health(),
        api_version: env!("CARGO_PKG_VERSION"),
    })
}
