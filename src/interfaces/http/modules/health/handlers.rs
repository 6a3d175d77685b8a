//! Health check handler

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::interfaces::http::router::AppState;

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    let probe_start = Instant::now();
    let (database, status_code) = match state.repo.ping().await {
        Ok(()) => (
            ComponentHealth {
                status: "up".to_string(),
                latency_ms: Some(probe_start.elapsed().as_millis() as u64),
            },
            StatusCode::OK,
        ),
        Err(_) => (
            ComponentHealth {
                status: "down".to_string(),
                latency_ms: None,
            },
            StatusCode::SERVICE_UNAVAILABLE,
        ),
    };

    let overall = if status_code == StatusCode::OK {
        "healthy"
    } else {
        "degraded"
    };
    (
        status_code,
        Json(HealthResponse {
            status: overall.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            database,
        }),
    )
}
