use ps_relay::request::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use ps_relay::http::DEFAULT_BASE_URL;
use ps_relay::{RelaySettings, UpstreamConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {name}")]
    Missing { name: &'static str },
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Everything the service reads from its environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub db_name: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing { name });

        let timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => parse::<u64>("UPSTREAM_TIMEOUT_SECS", &value)
                .and_then(|secs| {
                    if secs == 0 {
                        Err(ConfigError::Invalid {
                            name: "UPSTREAM_TIMEOUT_SECS",
                            value,
                        })
                    } else {
                        Ok(secs)
                    }
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let host = match get("PYSCRIBE_HOST") {
            Some(value) => parse("PYSCRIBE_HOST", &value)?,
            None => DEFAULT_HOST,
        };
        let port = match get("PYSCRIBE_PORT") {
            Some(value) => parse("PYSCRIBE_PORT", &value)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            db_name: required("DB_NAME")?,
            api_key: required("OPENROUTER_API_KEY")?,
            base_url: get("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(timeout),
            host,
            port,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: self.timeout,
        }
    }

    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig::new(self.api_key.clone()).with_base_url(self.base_url.clone())
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
