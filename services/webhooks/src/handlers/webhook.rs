use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::event::{Provider, WebhookEvent};
use crate::domain::types::SyncOutcome;
use crate::error::WebhookError;
use crate::state::AppState;
use crate::usecase::dispatch::DispatchEventUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clerk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl From<SyncOutcome> for WebhookResponse {
    fn from(outcome: SyncOutcome) -> Self {
        let (status, clerk_id, session_id) = match outcome {
            SyncOutcome::UserCreated { clerk_id } => ("user created", Some(clerk_id), None),
            SyncOutcome::UserDeleted { clerk_id, .. } => ("user deleted", Some(clerk_id), None),
            SyncOutcome::SessionCreated { session_id, .. } => {
                ("session created", None, Some(session_id))
            }
            SyncOutcome::SessionEnded { session_id, .. } => {
                ("session ended", None, Some(session_id))
            }
            SyncOutcome::Ignored => ("ignored", None, None),
        };
        Self {
            status,
            clerk_id,
            session_id,
        }
    }
}

// ── POST /webhooks/{provider} ────────────────────────────────────────────────

/// The body is read raw so that non-JSON payloads are reported like any other
/// malformed event instead of being rejected by the extractor.
pub async fn receive_webhook(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    body: Bytes,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let Some(provider) = Provider::from_path(&provider) else {
        return Err(WebhookError::UnknownProvider(provider));
    };
    debug!(?provider, payload = %String::from_utf8_lossy(&body), "incoming webhook");

    let event = WebhookEvent::from_slice(&body)?;
    info!(
        ?provider,
        event_type = event.kind().map(|k| k.as_str()).unwrap_or("ignored"),
        "webhook received"
    );

    let usecase = DispatchEventUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
    };
    let outcome = usecase.execute(event).await?;
    Ok(Json(outcome.into()))
}
