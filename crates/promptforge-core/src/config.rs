//! Configuration module
//!
//! Application configuration is an explicitly constructed, immutable value:
//! built once from the environment at startup and passed to each component at
//! construction time. There is no global settings singleton, which keeps
//! tests free to use distinct master secrets and database URLs per test.

use std::env;

use anyhow::{bail, Context};

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Fixed development master secret, only ever used outside production.
const DEV_MASTER_SECRET: &str = "promptforge-dev-master-secret";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub environment: String,
    /// Master secret for the credential vault. None means it was not
    /// configured; `validate()` rejects that outside development.
    pub encryption_master_key: Option<String>,
    /// Timeout applied to each outbound provider call.
    pub provider_timeout_seconds: u64,
    pub http_concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "dev-jwt-secret".to_string()),
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(JWT_EXPIRY_HOURS),
            environment,
            encryption_master_key: env::var("ENCRYPTION_MASTER_KEY").ok(),
            provider_timeout_seconds: env::var("PROVIDER_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(PROVIDER_TIMEOUT_SECS),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_000)
                .max(1),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Validate configuration invariants that must hold before serving traffic.
    ///
    /// A missing master secret outside development would otherwise fabricate
    /// an ephemeral vault key per process start, permanently orphaning every
    /// previously encrypted provider key on restart. Startup fails instead.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() {
            if self.encryption_master_key.is_none() {
                bail!("ENCRYPTION_MASTER_KEY must be set in production");
            }
            if self.jwt_secret == "dev-jwt-secret" {
                bail!("JWT_SECRET must be set in production");
            }
        }
        Ok(())
    }

    /// Master secret for the credential vault.
    ///
    /// In development a fixed (insecure) secret is substituted when none is
    /// configured, so that local data survives restarts. `validate()`
    /// guarantees this fallback is never reached in production.
    pub fn master_secret(&self) -> &str {
        match self.encryption_master_key.as_deref() {
            Some(secret) => secret,
            None => {
                tracing::warn!(
                    "ENCRYPTION_MASTER_KEY not set, using fixed development secret"
                );
                DEV_MASTER_SECRET
            }
        }
    }
}
