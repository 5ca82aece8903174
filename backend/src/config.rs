//! Runtime configuration, read from `CAR_API_*` environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:database.db";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Parse error: {name}={value:?} is not a valid {expected}")]
    Parse {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Only origin allowed by CORS; any origin when unset
    pub cors_origin: Option<HeaderValue>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            cors_origin: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source; unset variables keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CAR_API_DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(host) = lookup("CAR_API_HOST") {
            config.host = parse("CAR_API_HOST", host, "IP address")?;
        }
        if let Some(port) = lookup("CAR_API_PORT") {
            config.port = parse("CAR_API_PORT", port, "port number")?;
        }
        if let Some(origin) = lookup("CAR_API_CORS_ORIGIN") {
            config.cors_origin = Some(parse("CAR_API_CORS_ORIGIN", origin, "header value")?);
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(
    name: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Parse {
        name,
        value,
        expected,
    })
}
