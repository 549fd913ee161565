//! Server configuration
//!
//! Values are read from the process environment after `.env` has been loaded
//! by the binary. Every variable is optional; malformed values are reported as
//! a [`ConfigError`] instead of silently falling back.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub mod contracts;

pub use contracts::{ContractSettings, FeeMode, ResolutionPolicy};

use crate::services::oracle_service::DEFAULT_SCENARIO;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid resolution policy: {0}. Must be: threshold_bands or student_override")]
    InvalidPolicy(String),

    #[error("Invalid fee mode: {0}. Must be: burn or collect")]
    InvalidFeeMode(String),

    #[error("Invalid number for {0}: {1}")]
    InvalidNumber(&'static str, String),

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Top-level application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub default_scenario: String,
    pub contract: ContractSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3001,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            default_scenario: DEFAULT_SCENARIO.to_string(),
            contract: ContractSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(host) = env::var("HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host))?;
        }
        if let Ok(port) = env::var("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("PORT", port))?;
        }
        if let Ok(origins) = env::var("CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins = parse_origins(&origins);
        }
        if let Ok(scenario) = env::var("DEFAULT_SCENARIO") {
            if !scenario.trim().is_empty() {
                config.default_scenario = scenario.trim().to_string();
            }
        }
        config.contract = ContractSettings::from_env()?;

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
