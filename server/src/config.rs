//! Server configuration module.
//!
//! Configuration is loaded from environment variables once at startup. Any
//! error here is fatal: the server refuses to start rather than failing
//! token requests later.
//!
//! # Environment Variables
//!
//! - `CATALOG_JWT_KEY`: HMAC-SHA256 signing secret (required)
//! - `CATALOG_JWT_ISSUER`: `iss` claim issued and expected (required)
//! - `CATALOG_JWT_AUDIENCE`: `aud` claim issued and expected (required)
//! - `CATALOG_ACCESS_TOKEN_LIFETIME_MINUTES`: Token lifetime (default: `60`)
//! - `CATALOG_LISTEN_PORT`: Port to listen on (default: `3000`)
//!
//! # Invariants
//!
//! - `jwt` always holds validated settings (see [`JwtSettings`])
//! - `listen_port` is always a valid port number

use std::time::Duration;

use crate::auth::{JwtSettings, JwtSettingsError};

const JWT_KEY: &str = "CATALOG_JWT_KEY";
const JWT_ISSUER: &str = "CATALOG_JWT_ISSUER";
const JWT_AUDIENCE: &str = "CATALOG_JWT_AUDIENCE";
const TOKEN_LIFETIME_MINUTES: &str = "CATALOG_ACCESS_TOKEN_LIFETIME_MINUTES";
const LISTEN_PORT: &str = "CATALOG_LISTEN_PORT";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Settings for issuing and verifying bearer tokens.
    pub jwt: JwtSettings,
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default token lifetime in minutes.
    pub const DEFAULT_TOKEN_LIFETIME_MINUTES: u64 = 60;

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `CATALOG_JWT_KEY`, `CATALOG_JWT_ISSUER` or `CATALOG_JWT_AUDIENCE` is
    ///   not set or is empty
    /// - `CATALOG_ACCESS_TOKEN_LIFETIME_MINUTES` is set but not a positive integer
    /// - `CATALOG_LISTEN_PORT` is set but not a valid port number
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key = required(&lookup, JWT_KEY)?;
        let issuer = required(&lookup, JWT_ISSUER)?;
        let audience = required(&lookup, JWT_AUDIENCE)?;
        let lifetime = load_token_lifetime(&lookup)?;
        let listen_port = load_listen_port(&lookup)?;

        let jwt = JwtSettings::new(key.into_bytes(), issuer, audience, lifetime)
            .map_err(settings_error)?;

        Ok(Self { jwt, listen_port })
    }
}

/// Load a variable that must be present.
///
/// Emptiness is left to [`JwtSettings::new`] so the message names the setting.
fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, ConfigError> {
    lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Load the token lifetime, in minutes.
///
/// Returns the default if not set.
fn load_token_lifetime(lookup: &impl Fn(&str) -> Option<String>) -> Result<Duration, ConfigError> {
    let Some(value) = lookup(TOKEN_LIFETIME_MINUTES) else {
        return Ok(Duration::from_secs(
            ServerConfig::DEFAULT_TOKEN_LIFETIME_MINUTES * 60,
        ));
    };

    match value.parse::<u64>() {
        Ok(minutes) if minutes > 0 => minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::InvalidValue {
                name: TOKEN_LIFETIME_MINUTES.to_string(),
                message: format!("'{value}' minutes is too large"),
            }),
        _ => Err(ConfigError::InvalidValue {
            name: TOKEN_LIFETIME_MINUTES.to_string(),
            message: format!("'{value}' is not a positive number of minutes"),
        }),
    }
}

/// Load the listen port.
///
/// Returns the default if not set.
fn load_listen_port(lookup: &impl Fn(&str) -> Option<String>) -> Result<u16, ConfigError> {
    match lookup(LISTEN_PORT) {
        Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            name: LISTEN_PORT.to_string(),
            message: format!("'{value}' is not a valid port number (must be 1-65535)"),
        }),
        None => Ok(ServerConfig::DEFAULT_PORT),
    }
}

fn settings_error(e: JwtSettingsError) -> ConfigError {
    let name = match e {
        JwtSettingsError::EmptySecret => JWT_KEY,
        JwtSettingsError::EmptyIssuer => JWT_ISSUER,
        JwtSettingsError::EmptyAudience => JWT_AUDIENCE,
        JwtSettingsError::ZeroLifetime => TOKEN_LIFETIME_MINUTES,
    };
    ConfigError::InvalidValue {
        name: name.to_string(),
        message: e.to_string(),
    }
}
