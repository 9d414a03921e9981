//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CINESEARCH_*` environment
//! variables. Only the TMDb API key is required to start the server; the
//! Last.fm and OpenAI keys are optional and their features degrade
//! gracefully when absent.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::llm::DEFAULT_OPENAI_MODEL;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CINESEARCH_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// TMDb API key. Required for the server to start.
    pub tmdb_api_key: Option<String>,

    /// Last.fm API key. Optional; soundtracks fall back to generation.
    pub lastfm_api_key: Option<String>,

    /// OpenAI API key. Optional; refinement and enrichment degrade.
    pub openai_api_key: Option<String>,

    /// Chat model used for refinement and generation. Default: `gpt-4o`.
    pub openai_model: String,

    /// Timeout applied to outbound provider requests. Default: `10` seconds.
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            tmdb_api_key: None,
            lastfm_api_key: None,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            http_timeout_secs: 10,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "CINESEARCH_PORT";
    const ENV_BIND_ADDR: &'static str = "CINESEARCH_BIND_ADDR";
    const ENV_TMDB_API_KEY: &'static str = "CINESEARCH_TMDB_API_KEY";
    const ENV_LASTFM_API_KEY: &'static str = "CINESEARCH_LASTFM_API_KEY";
    const ENV_OPENAI_API_KEY: &'static str = "CINESEARCH_OPENAI_API_KEY";
    const ENV_OPENAI_MODEL: &'static str = "CINESEARCH_OPENAI_MODEL";
    const ENV_HTTP_TIMEOUT_SECS: &'static str = "CINESEARCH_HTTP_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let tmdb_api_key = Self::parse_optional_string_from_env(Self::ENV_TMDB_API_KEY);
        let lastfm_api_key = Self::parse_optional_string_from_env(Self::ENV_LASTFM_API_KEY);
        let openai_api_key = Self::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY);
        let openai_model =
            Self::parse_string_from_env(Self::ENV_OPENAI_MODEL, defaults.openai_model);
        let http_timeout_secs =
            Self::parse_u64_from_env(Self::ENV_HTTP_TIMEOUT_SECS, defaults.http_timeout_secs);

        Ok(Self {
            port,
            bind_addr,
            tmdb_api_key,
            lastfm_api_key,
            openai_api_key,
            openai_model,
            http_timeout_secs,
        })
    }

    /// Validates required settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tmdb_api_key.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_TMDB_API_KEY,
            });
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Outbound request timeout as a [`Duration`].
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
