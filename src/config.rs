//! Runtime configuration read from environment variables.

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_LOG_FILTER: &str = "library_catalog=debug,tower_http=debug";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for `{var}`: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
///
/// `HOST` and `PORT` choose the listen address. The log filter comes from
/// `RUST_LOG` and falls back to [`DEFAULT_LOG_FILTER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = lookup("PORT").unwrap_or_else(|| DEFAULT_PORT.into());
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        let host = host.parse::<IpAddr>().map_err(|e| ConfigError::InvalidValue {
            var: "HOST",
            value: host.clone(),
            reason: e.to_string(),
        })?;

        let port = port.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
            var: "PORT",
            value: port.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            host,
            port,
            log_filter,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
