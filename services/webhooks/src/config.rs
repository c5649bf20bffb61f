use anyhow::Context as _;

use idsync_core::tracing::LogFormat;

/// Webhook receiver configuration loaded from environment variables.
#[derive(Debug)]
pub struct WebhooksConfig {
    /// Database connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 5000). Env var: `WEBHOOKS_PORT`.
    pub webhooks_port: u16,
    /// Create missing tables at startup (default false). Env var: `WEBHOOKS_CREATE_SCHEMA`.
    pub create_schema: bool,
    /// `json` (default) or `pretty`. Env var: `LOG_FORMAT`.
    pub log_format: LogFormat,
}

impl WebhooksConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let webhooks_port = match lookup("WEBHOOKS_PORT") {
            Some(v) => v
                .parse()
                .with_context(|| format!("invalid WEBHOOKS_PORT: {v}"))?,
            None => 5000,
        };
        let create_schema = match lookup("WEBHOOKS_CREATE_SCHEMA") {
            Some(v) => parse_bool(&v)
                .with_context(|| format!("invalid WEBHOOKS_CREATE_SCHEMA: {v}"))?,
            None => false,
        };
        let log_format = match lookup("LOG_FORMAT") {
            Some(v) => LogFormat::parse(&v).with_context(|| format!("invalid LOG_FORMAT: {v}"))?,
            None => LogFormat::default(),
        };
        Ok(Self {
            database_url,
            webhooks_port,
            create_schema,
            log_format,
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
