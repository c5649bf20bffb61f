//! Typed view of inbound identity-provider webhook payloads.
//!
//! The envelope is `{ "type": ..., "data": {...}, "event_attributes": {...} }`.
//! Only the four kinds in [`EventKind`] are decoded; anything else becomes
//! [`WebhookEvent::Ignored`] without looking at `data`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::WebhookError;

/// Identity providers the receiver accepts events from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Clerk,
}

impl Provider {
    pub fn from_path(s: &str) -> Option<Self> {
        match s {
            "clerk" => Some(Self::Clerk),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    UserCreated,
    UserDeleted,
    SessionCreated,
    SessionRemoved,
}

impl EventKind {
    pub fn from_type(s: &str) -> Option<Self> {
        match s {
            "user.created" => Some(Self::UserCreated),
            "user.deleted" => Some(Self::UserDeleted),
            "session.created" => Some(Self::SessionCreated),
            "session.removed" => Some(Self::SessionRemoved),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserCreated => "user.created",
            Self::UserDeleted => "user.deleted",
            Self::SessionCreated => "session.created",
            Self::SessionRemoved => "session.removed",
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    event_attributes: Option<Value>,
}

/// A decoded webhook event.
#[derive(Debug, Clone)]
pub enum WebhookEvent {
    UserCreated(UserCreated),
    UserDeleted(UserDeleted),
    SessionCreated(SessionCreated),
    SessionRemoved(SessionRemoved),
    /// Unknown, missing or non-string `type`.
    Ignored { event_type: Option<String> },
}

impl WebhookEvent {
    /// Decode a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, WebhookError> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(WebhookError::MalformedPayload(
                "payload must be a JSON object".to_owned(),
            ));
        }
        let envelope: Envelope = serde_json::from_value(value)?;
        let event_type = envelope.kind.as_ref().and_then(Value::as_str);
        let Some(kind) = event_type.and_then(EventKind::from_type) else {
            return Ok(Self::Ignored {
                event_type: event_type.map(str::to_owned),
            });
        };

        let data = envelope
            .data
            .ok_or_else(|| WebhookError::MalformedPayload("missing field `data`".to_owned()))?;

        let event = match kind {
            EventKind::UserCreated => Self::UserCreated(serde_json::from_value(data)?),
            EventKind::UserDeleted => Self::UserDeleted(serde_json::from_value(data)?),
            EventKind::SessionCreated => {
                let attributes: EventAttributes = match envelope.event_attributes {
                    Some(value) => serde_json::from_value(value)?,
                    None => EventAttributes::default(),
                };
                Self::SessionCreated(SessionCreated {
                    session: serde_json::from_value(data)?,
                    request: attributes.http_request.unwrap_or_default(),
                })
            }
            EventKind::SessionRemoved => Self::SessionRemoved(serde_json::from_value(data)?),
        };
        Ok(event)
    }

    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::UserCreated(_) => Some(EventKind::UserCreated),
            Self::UserDeleted(_) => Some(EventKind::UserDeleted),
            Self::SessionCreated(_) => Some(EventKind::SessionCreated),
            Self::SessionRemoved(_) => Some(EventKind::SessionRemoved),
            Self::Ignored { .. } => None,
        }
    }
}

// ── user.created ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreated {
    pub id: String,
    pub email_addresses: Vec<EmailAddress>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub profile_image_url: Option<String>,
    /// Milliseconds since the epoch.
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub external_accounts: Option<Vec<ExternalAccount>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
    pub verification: Option<EmailVerification>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailVerification {
    pub status: Option<String>,
}

impl EmailAddress {
    pub fn is_verified(&self) -> bool {
        self.verification
            .as_ref()
            .and_then(|v| v.status.as_deref())
            == Some("verified")
    }
}

/// OAuth identity attached to the user at sign-up.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalAccount {
    pub provider: Option<String>,
    pub provider_user_id: Option<String>,
    pub approved_scopes: Option<String>,
}

impl ExternalAccount {
    /// `(provider, provider_user_id)` when both are present and non-empty.
    pub fn identity(&self) -> Option<(&str, &str)> {
        let provider = non_empty(self.provider.as_deref())?;
        let account_id = non_empty(self.provider_user_id.as_deref())?;
        Some((provider, account_id))
    }
}

impl UserCreated {
    /// First verified address, else the first address.
    pub fn primary_email(&self) -> Result<&EmailAddress, WebhookError> {
        self.email_addresses
            .iter()
            .find(|e| e.is_verified())
            .or_else(|| self.email_addresses.first())
            .ok_or_else(|| WebhookError::MalformedPayload("user has no email addresses".to_owned()))
    }

    /// `image_url`, falling back to `profile_image_url`; blank values are skipped.
    pub fn avatar_url(&self) -> Option<&str> {
        non_empty(self.image_url.as_deref())
            .or_else(|| non_empty(self.profile_image_url.as_deref()))
    }

    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .filter_map(non_empty)
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    pub fn external_accounts(&self) -> impl Iterator<Item = &ExternalAccount> {
        self.external_accounts.iter().flatten()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// ── user.deleted ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct UserDeleted {
    pub id: String,
}

// ── session.created ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SessionCreated {
    pub session: SessionData,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    pub id: String,
    /// Provider user id of the session owner.
    pub user_id: String,
    pub expire_at: Option<i64>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EventAttributes {
    http_request: Option<HttpRequest>,
}

/// Client details of the request that triggered the event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpRequest {
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

// ── session.removed ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRemoved {
    pub id: String,
}
