use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::event::{SessionCreated, SessionRemoved};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::{Session, SyncOutcome, timestamp_from_millis};
use crate::error::WebhookError;

// ── CreateSession ────────────────────────────────────────────────────────────

pub struct CreateSessionUseCase<U: UserRepository, S: SessionRepository> {
    pub users: U,
    pub sessions: S,
}

impl<U: UserRepository, S: SessionRepository> CreateSessionUseCase<U, S> {
    /// Sessions whose owner has not been synced yet are skipped, not failed.
    pub async fn execute(&self, event: SessionCreated) -> Result<SyncOutcome, WebhookError> {
        let SessionCreated { session, request } = event;
        let expires_at = timestamp_from_millis(session.expire_at)?;
        let created_at = timestamp_from_millis(session.created_at)?.unwrap_or_else(Utc::now);
        let updated_at = timestamp_from_millis(session.updated_at)?.unwrap_or(created_at);

        let Some(owner) = self.users.find_by_clerk_id(&session.user_id).await? else {
            info!(
                session_id = %session.id,
                clerk_id = %session.user_id,
                "session owner not found, skipping"
            );
            return Ok(SyncOutcome::SessionCreated {
                session_id: session.id,
                created: false,
            });
        };

        let record = Session {
            id: session.id,
            user_id: owner.id,
            expires_at,
            token: Uuid::new_v4().to_string(),
            ip_address: request.client_ip,
            user_agent: request.user_agent,
            created_at,
            updated_at,
        };
        self.sessions.create(&record).await?;
        info!(session_id = %record.id, user_id = %owner.id, "session created");
        Ok(SyncOutcome::SessionCreated {
            session_id: record.id,
            created: true,
        })
    }
}

// ── RemoveSession ────────────────────────────────────────────────────────────

pub struct RemoveSessionUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> RemoveSessionUseCase<S> {
    pub async fn execute(&self, event: SessionRemoved) -> Result<SyncOutcome, WebhookError> {
        let removed = self.sessions.delete(&event.id).await?;
        info!(session_id = %event.id, removed, "session ended");
        Ok(SyncOutcome::SessionEnded {
            session_id: event.id,
            removed,
        })
    }
}
