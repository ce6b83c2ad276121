//! Axum application setup.

use std::net::SocketAddr;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers;
use super::state::AppState;
use super::timing;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors_origins);

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/indicators", get(handlers::get_indicators))
        .route("/states", get(handlers::get_states))
        .route("/counties/:state", get(handlers::get_counties_by_state))
        .route("/data", get(handlers::get_data))
        .route("/validation", get(handlers::get_validation));

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(timing::track_time))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// API root with basic information.
async fn root() -> Json<Value> {
    Json(json!({
        "name": "HealthRank API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "County Health Rankings data exploration API",
        "health_check": "/api/v1/health",
    }))
}

/// `*` allows any origin; unparseable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(state: AppState, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    println!("Server listening on http://{}", addr);
    info!(%addr, "server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use healthrank::{DataService, DataTable, IndicatorExtractor, QualityValidator, ValidationSchema};
    use tower::ServiceExt;

    use crate::config::Settings;

    fn service() -> DataService {
        let headers: Vec<String> = [
            "fipscode",
            "state",
            "county",
            "year",
            "v001_rawvalue",
            "v001_cilow",
            "v001_cihigh",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let rows = vec![
            vec!["39001", "Ohio", "Adams", "2025", "350.5", "325.1", "375.8"],
            vec!["39003", "Ohio", "Allen", "2025", "310.0", "300.0", "320.0"],
            vec!["19001", "Iowa", "Adair", "2025", "", "", ""],
        ];
        let table = DataTable::from_text_rows(
            headers.clone(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        );
        let catalog = IndicatorExtractor::extract(&headers, &headers);
        DataService::new(table, catalog)
    }

    fn router(service: DataService) -> Router {
        create_router(AppState::new(service, Settings::default()))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_root_info() {
        let (status, body) = get(router(service()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["health_check"], "/api/v1/health");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(router(service()), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["data_service"]["counties_loaded"], 3);
        assert_eq!(body["data_service"]["indicators_available"], 1);
    }

    #[tokio::test]
    async fn test_states_and_indicators() {
        let (_, states) = get(router(service()), "/api/v1/states").await;
        assert_eq!(states, json!(["Iowa", "Ohio"]));

        let (_, indicators) = get(router(service()), "/api/v1/indicators").await;
        assert_eq!(indicators[0]["id"], "v001");
        assert_eq!(indicators[0]["has_confidence_intervals"], true);
    }

    #[tokio::test]
    async fn test_counties_by_state() {
        let (status, body) = get(router(service()), "/api/v1/counties/OHIO").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["county"], "Adams");

        let (status, body) = get(router(service()), "/api/v1/counties/Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["details"]["resource_type"], "state");
    }

    #[tokio::test]
    async fn test_data_requires_filter() {
        let (status, body) = get(router(service()), "/api/v1/data").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert!(body["details"].is_object());
    }

    #[tokio::test]
    async fn test_data_rejects_bad_fips() {
        let (status, _) = get(router(service()), "/api/v1/data?fipscode=123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_data_unknown_indicator() {
        let (status, body) = get(router(service()), "/api/v1/data?indicator=v002").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["details"]["resource_type"], "indicator");
    }

    #[tokio::test]
    async fn test_data_query() {
        let (status, body) = get(
            router(service()),
            "/api/v1/data?state=ohio&indicator=v001&year=2025&limit=1",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["fipscode"], "39001");
        assert_eq!(records[0]["v001_rawvalue"], 350.5);
        assert_eq!(records[0]["year"], 2025);
    }

    #[tokio::test]
    async fn test_validation_report() {
        let (status, _) = get(router(service()), "/api/v1/validation").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let service = service();
        let validator = QualityValidator::new(ValidationSchema::default()).unwrap();
        let report = validator.run_all(service.table(), &service.table().headers, service.catalog());
        let (status, body) = get(router(service.with_report(report)), "/api/v1/validation").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_valid"], false);
        assert_eq!(
            body["checks"]["structure"]["errors"][0],
            "Insufficient indicators: 1 < 10"
        );
        let checks: Vec<&String> = body["checks"].as_object().unwrap().keys().collect();
        assert_eq!(checks, vec!["structure", "geographic", "indicators", "completeness"]);
    }

    #[tokio::test]
    async fn test_process_time_header() {
        let response = router(service())
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response
            .headers()
            .get(timing::PROCESS_TIME_HEADER)
            .expect("timing header")
            .to_str()
            .unwrap();
        assert!(header.parse::<f64>().unwrap() >= 0.0);
    }

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        // Building must not panic on bad input
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
        let _ = cors_layer(&["*".to_string()]);
    }
}
