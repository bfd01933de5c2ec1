use axum::Json;

use crate::dto::HealthResponse;

/// GET /health - Liveness check. Never touches the event log.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
