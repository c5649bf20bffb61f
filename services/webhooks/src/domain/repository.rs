#![allow(async_fn_in_trait)]

use crate::domain::types::{Account, Session, User};
use crate::error::WebhookError;

/// Repository for mirrored users and their linked accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>, WebhookError>;

    /// Insert a user together with its linked accounts in one transaction.
    async fn create(&self, user: &User, accounts: &[Account]) -> Result<(), WebhookError>;

    /// Delete a user with its sessions and accounts. Returns `true` if the user existed.
    async fn delete_by_clerk_id(&self, clerk_id: &str) -> Result<bool, WebhookError>;
}

/// Repository for sign-in sessions.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), WebhookError>;

    /// Delete a session. Returns `true` if a row was deleted.
    async fn delete(&self, id: &str) -> Result<bool, WebhookError>;
}
