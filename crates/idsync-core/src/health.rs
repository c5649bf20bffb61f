use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Body returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct LivenessMessage {
    pub message: &'static str,
}

/// Handler for `GET /`: human-readable liveness banner.
pub async fn root() -> (StatusCode, Json<LivenessMessage>) {
    (
        StatusCode::OK,
        Json(LivenessMessage {
            message: "webhook receiver is running",
        }),
    )
}

/// Handler for `GET /healthz`: liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map the outcome of a readiness probe (e.g. a database ping) to a status code.
pub fn readiness_status<E: std::fmt::Display>(probe: Result<(), E>) -> StatusCode {
    match probe {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
