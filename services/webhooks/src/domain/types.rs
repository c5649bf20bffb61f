use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::WebhookError;

/// User mirrored from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub clerk_id: String,
    pub email: String,
    pub email_verified: bool,
    pub name: Option<String>,
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Sign-in session owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: Option<DateTime<Utc>>,
    /// Placeholder until real session credentials are issued.
    pub token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// External provider identity linked to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider_id: String,
    pub account_id: String,
    pub scope: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a processed webhook did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    UserCreated { clerk_id: String },
    UserDeleted { clerk_id: String, removed: bool },
    /// `created` is false when the owning user is unknown.
    SessionCreated { session_id: String, created: bool },
    SessionEnded { session_id: String, removed: bool },
    Ignored,
}

/// Convert a provider millisecond epoch timestamp. Absent and zero values map to `None`.
pub fn timestamp_from_millis(millis: Option<i64>) -> Result<Option<DateTime<Utc>>, WebhookError> {
    match millis {
        None | Some(0) => Ok(None),
        Some(ms) => DateTime::from_timestamp_millis(ms).map(Some).ok_or_else(|| {
            WebhookError::MalformedPayload(format!("timestamp out of range: {ms}"))
        }),
    }
}
