use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Empty means any origin is accepted
    pub allowed_origins: Vec<String>,
    pub rate_limit_enabled: bool,
    /// Roll number prefix, e.g. `AMU` in `AMU20260042`
    pub institution_prefix: String,
    /// Cron expression (with seconds) for the overdue fee sweep
    pub fee_sweep_schedule: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8001".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "campus-server".to_string()),
            allowed_origins: parse_list(&env::var("CORS_ORIGINS").unwrap_or_default()),
            rate_limit_enabled: env::var("RATE_LIMIT_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            institution_prefix: env::var("INSTITUTION_PREFIX")
                .unwrap_or_else(|_| "AMU".to_string()),
            fee_sweep_schedule: env::var("FEE_SWEEP_SCHEDULE")
                .unwrap_or_else(|_| "0 0 * * * *".to_string()),
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
