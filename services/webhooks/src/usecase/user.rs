use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::event::{UserCreated, UserDeleted};
use crate::domain::repository::UserRepository;
use crate::domain::types::{Account, SyncOutcome, User, timestamp_from_millis};
use crate::error::WebhookError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, event: UserCreated) -> Result<SyncOutcome, WebhookError> {
        let email = event.primary_email()?;
        let user = User {
            id: Uuid::now_v7(),
            clerk_id: event.id.clone(),
            email: email.email_address.clone(),
            email_verified: email.is_verified(),
            name: event.display_name(),
            image: event.avatar_url().map(str::to_owned),
            created_at: timestamp_from_millis(event.created_at)?,
            updated_at: timestamp_from_millis(event.updated_at)?,
        };

        let now = Utc::now();
        let mut accounts = Vec::new();
        for external in event.external_accounts() {
            let Some((provider_id, account_id)) = external.identity() else {
                debug!(clerk_id = %user.clerk_id, "skipping external account without identity");
                continue;
            };
            accounts.push(Account {
                id: Uuid::now_v7(),
                user_id: user.id,
                provider_id: provider_id.to_owned(),
                account_id: account_id.to_owned(),
                scope: external.approved_scopes.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        self.repo.create(&user, &accounts).await?;
        info!(
            clerk_id = %user.clerk_id,
            user_id = %user.id,
            accounts = accounts.len(),
            "user created"
        );
        Ok(SyncOutcome::UserCreated {
            clerk_id: user.clerk_id,
        })
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, event: UserDeleted) -> Result<SyncOutcome, WebhookError> {
        let removed = self.repo.delete_by_clerk_id(&event.id).await?;
        info!(clerk_id = %event.id, removed, "user deleted");
        Ok(SyncOutcome::UserDeleted {
            clerk_id: event.id,
            removed,
        })
    }
}
