use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures surfaced by the webhook endpoint.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("{0}")]
    MalformedPayload(String),
    #[error("unknown webhook provider: {0}")]
    UnknownProvider(String),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl From<serde_json::Error> for WebhookError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedPayload(e.to_string())
    }
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownProvider(_) => StatusCode::NOT_FOUND,
            Self::MalformedPayload(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => tracing::error!(error = %format!("{e:#}"), "webhook failed"),
            other => tracing::warn!(error = %other, "webhook rejected"),
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}
