use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};

use idsync_webhooks_schema::{accounts, sessions, users};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::{Account, Session, User};
use crate::error::WebhookError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>, WebhookError> {
        let model = users::Entity::find()
            .filter(users::Column::ClerkId.eq(clerk_id))
            .one(&self.db)
            .await
            .context("find user by clerk id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User, linked: &[Account]) -> Result<(), WebhookError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let user = user.clone();
                let linked = linked.to_vec();
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        clerk_id: Set(user.clerk_id),
                        email: Set(user.email),
                        email_verified: Set(user.email_verified),
                        name: Set(user.name),
                        image: Set(user.image),
                        created_at: Set(user.created_at),
                        updated_at: Set(user.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    for account in linked {
                        accounts::ActiveModel {
                            id: Set(account.id),
                            user_id: Set(account.user_id),
                            account_id: Set(account.account_id),
                            provider_id: Set(account.provider_id),
                            access_token: Set(None),
                            refresh_token: Set(None),
                            id_token: Set(None),
                            access_token_expires_at: Set(None),
                            refresh_token_expires_at: Set(None),
                            scope: Set(account.scope),
                            password: Set(None),
                            created_at: Set(account.created_at),
                            updated_at: Set(account.updated_at),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create user")?;
        Ok(())
    }

    async fn delete_by_clerk_id(&self, clerk_id: &str) -> Result<bool, WebhookError> {
        let clerk_id = clerk_id.to_owned();
        let removed = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let Some(user) = users::Entity::find()
                        .filter(users::Column::ClerkId.eq(clerk_id))
                        .one(txn)
                        .await?
                    else {
                        return Ok(false);
                    };

                    // Explicit so the cascade holds even where FK enforcement is off.
                    sessions::Entity::delete_many()
                        .filter(sessions::Column::UserId.eq(user.id))
                        .exec(txn)
                        .await?;
                    accounts::Entity::delete_many()
                        .filter(accounts::Column::UserId.eq(user.id))
                        .exec(txn)
                        .await?;
                    users::Entity::delete_by_id(user.id).exec(txn).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete user by clerk id")?;
        Ok(removed)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        clerk_id: model.clerk_id,
        email: model.email,
        email_verified: model.email_verified,
        name: model.name,
        image: model.image,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), WebhookError> {
        sessions::ActiveModel {
            id: Set(session.id.clone()),
            user_id: Set(session.user_id),
            expires_at: Set(session.expires_at),
            token: Set(session.token.clone()),
            ip_address: Set(session.ip_address.clone()),
            user_agent: Set(session.user_agent.clone()),
            created_at: Set(session.created_at),
            updated_at: Set(session.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, WebhookError> {
        let result = sessions::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await
            .context("delete session")?;
        Ok(result.rows_affected > 0)
    }
}
