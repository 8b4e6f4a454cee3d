//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use quill_infra::JwtConfig;
use quill_infra::auth::DEFAULT_SECRET;
use quill_infra::database::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration, built once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    /// Origin allowed by CORS. `None` allows any origin.
    pub allowed_origin: Option<String>,
    pub uploads_dir: PathBuf,
    pub telemetry: TelemetryConfig,
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = non_empty("DATABASE_URL").map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = parsed("DB_MAX_CONNECTIONS") {
                config.max_connections = max;
            }
            if let Some(min) = parsed("DB_MIN_CONNECTIONS") {
                config.min_connections = min;
            }
            config
        });

        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: non_empty("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: parsed("JWT_EXPIRATION_HOURS").unwrap_or(defaults.expiration_hours),
            issuer: non_empty("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(5000),
            database,
            jwt,
            allowed_origin: non_empty("ALLOWED_ORIGIN"),
            uploads_dir: non_empty("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            telemetry: TelemetryConfig::from_env(),
        }
    }

    /// Whether tokens are being signed with the built-in development secret.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt.secret == DEFAULT_SECRET
    }
}
