use tracing::info;

use crate::domain::event::WebhookEvent;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::SyncOutcome;
use crate::error::WebhookError;
use crate::usecase::session::{CreateSessionUseCase, RemoveSessionUseCase};
use crate::usecase::user::{CreateUserUseCase, DeleteUserUseCase};

/// Route a decoded event to the use case that applies it to the store.
pub struct DispatchEventUseCase<U: UserRepository, S: SessionRepository> {
    pub users: U,
    pub sessions: S,
}

impl<U: UserRepository, S: SessionRepository> DispatchEventUseCase<U, S> {
    pub async fn execute(self, event: WebhookEvent) -> Result<SyncOutcome, WebhookError> {
        match event {
            WebhookEvent::UserCreated(event) => {
                CreateUserUseCase { repo: self.users }.execute(event).await
            }
            WebhookEvent::UserDeleted(event) => {
                DeleteUserUseCase { repo: self.users }.execute(event).await
            }
            WebhookEvent::SessionCreated(event) => {
                CreateSessionUseCase {
                    users: self.users,
                    sessions: self.sessions,
                }
                .execute(event)
                .await
            }
            WebhookEvent::SessionRemoved(event) => {
                RemoveSessionUseCase {
                    sessions: self.sessions,
                }
                .execute(event)
                .await
            }
            WebhookEvent::Ignored { event_type } => {
                info!(
                    event_type = event_type.as_deref().unwrap_or("<none>"),
                    "ignoring webhook event"
                );
                Ok(SyncOutcome::Ignored)
            }
        }
    }
}
