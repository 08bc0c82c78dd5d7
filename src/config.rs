use std::env;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::services::db::DbConfig;
use crate::surfaces::Surface;

pub const DEFAULT_DB_NAME: &str = "portfolio";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    pub port: u16,
    pub cors_origin: HeaderValue,
    pub surface: Surface,
}

impl DbConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let uri = lookup("MONGODB_URI")
            .filter(|uri| !uri.trim().is_empty())
            .ok_or(ConfigError::Missing("MONGODB_URI"))?;
        let db_name = lookup("MONGODB_DB_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
        Ok(Self { uri, db_name })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|name: &str| env::var(name).ok())
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name: &str| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db = DbConfig::from_lookup(&lookup)?;

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(&origin).map_err(|_| ConfigError::Invalid {
            name: "CORS_ORIGIN",
            value: origin.clone(),
        })?;

        let surface = match lookup("SERVER_SURFACE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_SURFACE",
                value: raw,
            })?,
            None => Surface::default(),
        };

        Ok(Self {
            db,
            port,
            cors_origin,
            surface,
        })
    }
}
