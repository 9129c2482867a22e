use anyhow::{Context, Result};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// e.g. `sqlite://liftlog.db`
    pub database_url: String,
    /// HS256 secret used to validate bearer tokens.
    pub auth_secret: String,
    pub request_timeout_secs: u64,
    /// Parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `DATABASE_URL`         | `sqlite://liftlog.db`      |
    /// | `AUTH_SECRET`          | required                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `LOG_LEVEL`            | `info`                     |
    pub fn from_env() -> Result<Self> {
        let port = var_or("PORT", "3000")
            .parse()
            .context("PORT must be a valid u16")?;
        let request_timeout_secs = var_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;
        let auth_secret = std::env::var("AUTH_SECRET").context("AUTH_SECRET must be set")?;
        if auth_secret.is_empty() {
            anyhow::bail!("AUTH_SECRET must not be empty");
        }

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port,
            database_url: var_or("DATABASE_URL", "sqlite://liftlog.db"),
            auth_secret,
            request_timeout_secs,
            cors_origins: parse_origins(&var_or("CORS_ORIGINS", "http://localhost:5173")),
            log_level: var_or("LOG_LEVEL", "info"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
