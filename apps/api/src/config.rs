use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub smtp: SmtpConfig,
    pub port: u16,
    pub rust_log: String,
    /// Interviews older than this many days are exported and deleted by the
    /// retention sweep.
    pub retention_days: i64,
}

/// SMTP relay settings for outbound notification mail.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            smtp: SmtpConfig {
                host: require_env("SMTP_SERVER")?,
                port: std::env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse::<u16>()
                    .context("SMTP_PORT must be a valid port number")?,
                username: require_env("EMAIL_ADDRESS")?,
                password: require_env("EMAIL_PASSWORD")?,
                from_address: match std::env::var("EMAIL_FROM") {
                    Ok(v) => v,
                    Err(_) => require_env("EMAIL_ADDRESS")?,
                },
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            retention_days: std::env::var("RETENTION_DAYS")
                .unwrap_or_else(|_| "180".to_string())
                .parse::<i64>()
                .context("RETENTION_DAYS must be a whole number of days")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/parley_test".to_string(),
            anthropic_api_key: "test-key".to_string(),
            smtp: SmtpConfig {
                host: "localhost".to_string(),
                port: 587,
                username: "noreply@parley.test".to_string(),
                password: "secret".to_string(),
                from_address: "noreply@parley.test".to_string(),
            },
            port: 0,
            rust_log: "info".to_string(),
            retention_days: 180,
        }
    }
}
