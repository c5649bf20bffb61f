//! In-memory SQLite store for integration tests.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Connect to a fresh in-memory SQLite database with every table created.
///
/// The pool is pinned to a single connection: each SQLite `:memory:`
/// connection is its own database.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory sqlite");
    idsync_webhooks_schema::create_tables(&db)
        .await
        .expect("failed to create tables");
    db
}
