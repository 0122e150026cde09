use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub jwt_secret: String,
    pub allowed_origins: Vec<String>,
    pub comments_per_page: usize,
    pub rate_limit_per_minute: u32,
    pub store_write_attempts: u32,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            port: try_load("PORT", "3001")?,
            redis_url: require("REDIS_URL")?,
            jwt_secret: require("JWT_SECRET")?,
            allowed_origins: try_load::<String>("ALLOWED_ORIGINS", "http://localhost:3000")?
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            comments_per_page: try_load("COMMENTS_PER_PAGE", "5")?,
            rate_limit_per_minute: try_load("RATE_LIMIT_PER_MINUTE", "1000")?,
            store_write_attempts: try_load("STORE_WRITE_ATTEMPTS", "5")?,
        })
    }
}

fn require(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::EnvError(format!("{key} must be set")))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        AppError::EnvError(format!("Invalid {key} value '{raw}': {e}"))
    })
}
