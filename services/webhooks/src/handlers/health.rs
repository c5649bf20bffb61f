use axum::{extract::State, http::StatusCode};

use idsync_core::health::readiness_status;

use crate::state::AppState;

/// `GET /readyz`: 200 once the store answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness_status(state.db.ping().await)
}
