use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use idsync_core::tracing::init_tracing;
use idsync_webhooks::config::WebhooksConfig;
use idsync_webhooks::router::build_router;
use idsync_webhooks::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be populated.
    let _ = dotenv::dotenv();

    let config = WebhooksConfig::from_env()?;
    init_tracing(config.log_format);

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.create_schema {
        idsync_webhooks_schema::create_tables(&db)
            .await
            .context("failed to create tables")?;
        info!("database schema ensured");
    }

    let router = build_router(AppState { db });
    let addr = format!("0.0.0.0:{}", config.webhooks_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("webhook receiver listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
