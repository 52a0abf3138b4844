// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Header injected by the upstream identity provider.
pub const DEFAULT_IDENTITY_HEADER: &str = "X-User-Email";

/// Which user store backs the profile service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Cloud Firestore (production).
    Firestore,
    /// In-process store, contents lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND", s.to_string())),
        }
    }
}

/// How the caller identity is established at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityMode {
    /// Trust an email header set by the fronting gateway.
    TrustedHeader,
    /// Verify an HS256 bearer token carrying an `email` claim.
    Jwt,
}

impl FromStr for IdentityMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(Self::TrustedHeader),
            "jwt" => Ok(Self::Jwt),
            _ => Err(ConfigError::Invalid("IDENTITY_MODE", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    pub store_backend: StoreBackend,
    pub identity_mode: IdentityMode,
    /// Header carrying the caller email in trusted-header mode
    pub identity_header: String,
    /// JWT signing key (raw bytes), required in jwt mode
    pub jwt_signing_key: Option<Vec<u8>>,
    /// Create a default profile when GetProfile finds nothing
    pub create_on_miss: bool,
    /// Photo used for profiles created on miss
    pub default_photo_url: String,
    /// Upper bound on the time spent serving one request
    pub request_timeout: Duration,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            gcp_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            store_backend: StoreBackend::Memory,
            identity_mode: IdentityMode::TrustedHeader,
            identity_header: DEFAULT_IDENTITY_HEADER.to_string(),
            jwt_signing_key: Some(b"test_jwt_key_32_bytes_minimum!!".to_vec()),
            create_on_miss: false,
            default_photo_url: String::new(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let identity_mode: IdentityMode = env_or("IDENTITY_MODE", "header").parse()?;
        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(String::into_bytes);

        if identity_mode == IdentityMode::Jwt && jwt_signing_key.is_none() {
            return Err(ConfigError::Missing("JWT_SIGNING_KEY"));
        }

        Ok(Self {
            port: env_or("PORT", "8080").parse().unwrap_or(8080),
            gcp_project_id: env_or("GCP_PROJECT_ID", "local-dev"),
            frontend_url: env_or("FRONTEND_URL", "http://localhost:5173"),
            store_backend: env_or("STORE_BACKEND", "firestore").parse()?,
            identity_mode,
            identity_header: env_or("IDENTITY_HEADER", DEFAULT_IDENTITY_HEADER),
            jwt_signing_key,
            create_on_miss: env_flag("PROFILE_CREATE_ON_MISS")?,
            default_photo_url: env_or("DEFAULT_PHOTO_URL", ""),
            request_timeout: Duration::from_secs(
                env_or("REQUEST_TIMEOUT_SECS", "10").parse().unwrap_or(10),
            ),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_flag(name: &'static str) -> Result<bool, ConfigError> {
    parse_bool(name, &env_or(name, "false"))
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid(name, raw.to_string())),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("STORE_BACKEND", "memory");
        env::set_var("IDENTITY_MODE", "header");
        env::set_var("PROFILE_CREATE_ON_MISS", "true");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.identity_mode, IdentityMode::TrustedHeader);
        assert!(config.create_on_miss);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("JWT".parse::<IdentityMode>().unwrap(), IdentityMode::Jwt);
        assert_eq!(
            "Firestore".parse::<StoreBackend>().unwrap(),
            StoreBackend::Firestore
        );
        assert!(matches!(
            "mongo".parse::<StoreBackend>(),
            Err(ConfigError::Invalid("STORE_BACKEND", _))
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "yes").unwrap());
        assert!(!parse_bool("X", "").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }
}
