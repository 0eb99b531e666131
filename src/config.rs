use std::path::PathBuf;

use anyhow::Context;

/// Resolved settings for `taskboard serve`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 3000;

    pub fn new(
        host: impl Into<String>,
        port: u16,
        db_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            host: host.into(),
            port,
            db_path: resolve_db_path(db_path)?,
        })
    }

    /// `host:port`, resolved by the listener so hostnames work too.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// An explicit path wins; otherwise fall back to the platform data directory.
pub fn resolve_db_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    explicit
        .or_else(taskboard_core::db::default_path)
        .context("Could not determine a database path; pass --db or set TASKBOARD_DB")
}
