use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Environment variable {0} is required")]
    Missing(&'static str),
    #[error("Invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Process-wide settings, read once at startup from `SHOWROOM_*`
/// environment variables and passed to the server bootstrap.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
    pub jwt_secret: Option<String>,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub token_ttl_hours: i64,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            database_url: var("SHOWROOM_DATABASE_URL")
                .ok_or(ConfigError::Missing("SHOWROOM_DATABASE_URL"))?,
            bind_address: var("SHOWROOM_BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            allowed_origins: match var("SHOWROOM_ALLOWED_ORIGINS") {
                Some(origins) => parse_origins(&origins)?,
                None => vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            },
            jwt_secret: var("SHOWROOM_JWT_SECRET"),
            admin_username: var("SHOWROOM_ADMIN_USERNAME"),
            admin_password: var("SHOWROOM_ADMIN_PASSWORD"),
            token_ttl_hours: token_ttl_hours(var("SHOWROOM_TOKEN_TTL_HOURS"))?,
            request_timeout_secs: try_load(
                "SHOWROOM_REQUEST_TIMEOUT_SECS",
                var("SHOWROOM_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        })
    }
}

/// Credentialed CORS needs explicit origins, so `*` is refused.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|origin| origin == "*") {
        return Err(ConfigError::Invalid {
            key: "SHOWROOM_ALLOWED_ORIGINS",
            message: "wildcard origin is not allowed; list each origin".to_string(),
        });
    }

    Ok(origins)
}

fn token_ttl_hours(value: Option<String>) -> Result<i64, ConfigError> {
    let hours = try_load("SHOWROOM_TOKEN_TTL_HOURS", value, DEFAULT_TOKEN_TTL_HOURS)?;
    if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
        warn!(hours, "Token lifetime out of range");
        return Err(ConfigError::Invalid {
            key: "SHOWROOM_TOKEN_TTL_HOURS",
            message: format!("must be between 1 and {MAX_TOKEN_TTL_HOURS} hours"),
        });
    }
    Ok(hours)
}

fn try_load<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match value {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                message: e.to_string(),
            }
        }),
        None => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
