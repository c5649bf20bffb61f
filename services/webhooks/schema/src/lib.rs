//! sea-orm entities for the identity tables synchronized from webhook events.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};

pub mod accounts;
pub mod sessions;
pub mod users;
pub mod verifications;

/// Create every table (and its unique/foreign-key constraints) that does not
/// exist yet. Parents are created before children.
///
/// This only bootstraps an empty database; it never alters existing tables.
pub async fn create_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    create_table(db, users::Entity).await?;
    create_table(db, sessions::Entity).await?;
    create_table(db, accounts::Entity).await?;
    create_table(db, verifications::Entity).await
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}
