//! Startup configuration validation.
//!
//! Both provider credentials are required. [`Credentials::from_env_values`]
//! runs before the listener is bound so a misconfigured process exits with a
//! readable diagnostic instead of failing on its first request.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::consts::{OPENROUTER_KEY_VAR, SERPER_KEY_VAR};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable(s): {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),
}

/// Secrets for the two outbound providers.
#[derive(Clone)]
pub struct Credentials {
    pub openrouter_api_key: String,
    pub serper_api_key: String,
}

impl Credentials {
    /// Validate raw values as read from the environment. Blank counts as missing.
    pub fn from_env_values(
        openrouter: Option<String>,
        serper: Option<String>,
    ) -> Result<Self, ConfigError> {
        let openrouter = openrouter.filter(|v| !v.trim().is_empty());
        let serper = serper.filter(|v| !v.trim().is_empty());

        match (openrouter, serper) {
            (Some(openrouter_api_key), Some(serper_api_key)) => Ok(Self {
                openrouter_api_key,
                serper_api_key,
            }),
            (openrouter, serper) => {
                let mut missing = Vec::new();
                if openrouter.is_none() {
                    missing.push(OPENROUTER_KEY_VAR);
                }
                if serper.is_none() {
                    missing.push(SERPER_KEY_VAR);
                }
                Err(ConfigError::MissingCredentials(missing))
            }
        }
    }
}

// Keys must never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openrouter_api_key", &"<redacted>")
            .field("serper_api_key", &"<redacted>")
            .finish()
    }
}

/// Everything the server needs, validated.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub model: Option<String>,
    pub enrich_timeout: Duration,
    pub http_timeout: Duration,
    pub credentials: Credentials,
}

pub fn parse_addr(host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", host, port)))
}
