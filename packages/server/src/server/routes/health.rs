use axum::{extract::Extension, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Seconds since the server started
    pub uptime: f64,
    pub timestamp: String,
}

/// Root liveness message
pub async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: "Books Dashboard API is running",
    })
}

/// Health check endpoint
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
