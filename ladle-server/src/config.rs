//! Process configuration, read once from the environment at startup.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::validation::MAX_STATIONS;

/// Errors loading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable is set but can't be parsed
    #[error("invalid {key} value {value:?}: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Connection pool settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// How long a request may wait for a pooled connection.
    pub acquire_timeout: Duration,
}

/// Settings for map-link resolution and the nearest-station lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoConfig {
    /// Timeout for following a shortlink, including every redirect.
    pub timeout: Duration,
    /// Maximum number of redirects to follow.
    pub max_redirects: usize,
    /// Stations farther than this are never suggested.
    pub radius_km: f64,
    /// How many stations to suggest.
    pub station_limit: usize,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_redirects: 10,
            radius_km: 1.0,
            station_limit: 2,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub database: DatabaseConfig,
    pub geo: GeoConfig,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let geo_defaults = GeoConfig::default();

        let radius_km = parse_or(&lookup, "NEAREST_STATION_RADIUS_KM", geo_defaults.radius_km)?;
        let radius_km = ensure(
            "NEAREST_STATION_RADIUS_KM",
            radius_km,
            radius_km.is_finite() && radius_km >= 0.0,
            "must be a non-negative number of km",
        )?;

        // Suggestions pre-select stations on the form, so they must pass validation.
        let station_limit = parse_or(&lookup, "NEAREST_STATION_LIMIT", geo_defaults.station_limit)?;
        let station_limit = ensure(
            "NEAREST_STATION_LIMIT",
            station_limit,
            (1..=MAX_STATIONS).contains(&station_limit),
            &format!("must be between 1 and {MAX_STATIONS}"),
        )?;

        Ok(Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            database: DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
                acquire_timeout: Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            },
            geo: GeoConfig {
                timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "GEO_TIMEOUT_SECS",
                    geo_defaults.timeout.as_secs(),
                )?),
                max_redirects: geo_defaults.max_redirects,
                radius_km,
                station_limit,
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
            value,
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn ensure<T: Display>(key: &'static str, value: T, valid: bool, message: &str) -> Result<T, ConfigError> {
    if valid {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            message: message.to_string(),
        })
    }
}
