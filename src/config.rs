// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr, str::FromStr, time::Duration};

/// Runtime settings, read from the environment. `main` loads `.env` first.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// How long the "saving" indicator stays on after a save.
    pub save_indicator: Duration,
    pub session_ttl_hours: i64,
    pub seed_admin_username: String,
    pub seed_admin_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://edu_dashboard.db".to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            save_indicator: Duration::from_millis(800),
            session_ttl_hours: 24,
            seed_admin_username: "admin".to_string(),
            seed_admin_password: "admin".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let config = Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: parse_var("BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            save_indicator: parse_var::<u64>("SAVE_INDICATOR_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.save_indicator),
            session_ttl_hours: parse_var("SESSION_TTL_HOURS")?.unwrap_or(defaults.session_ttl_hours),
            seed_admin_username: env::var("SEED_ADMIN_USERNAME")
                .unwrap_or(defaults.seed_admin_username),
            seed_admin_password: env::var("SEED_ADMIN_PASSWORD")
                .unwrap_or(defaults.seed_admin_password),
        };

        if config.session_ttl_hours <= 0 {
            return Err(AppError::Config("SESSION_TTL_HOURS must be positive".into()));
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str) -> AppResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} has an invalid value: '{}'", name, raw))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::Config(format!("{}: {}", name, e))),
    }
}
