//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VITRINA_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VITRINA_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the catalog manifest, item table, and embedding
    /// matrices. Default: `./data/catalog`.
    pub catalog_dir: PathBuf,

    /// Embedding sidecar endpoint (joint + visual encoders).
    /// Default: `http://localhost:8091`.
    pub encoder_url: String,

    /// Cross-encoder scoring sidecar endpoint. Default: `http://localhost:8092`.
    pub scorer_url: String,

    /// Timeout applied to each remote collaborator call, in seconds.
    /// Default: `30`.
    pub remote_timeout_secs: u64,
}

/// Default embedding sidecar URL used when `VITRINA_ENCODER_URL` is not set.
pub const DEFAULT_ENCODER_URL: &str = "http://localhost:8091";

/// Default scoring sidecar URL used when `VITRINA_SCORER_URL` is not set.
pub const DEFAULT_SCORER_URL: &str = "http://localhost:8092";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            catalog_dir: PathBuf::from("./data/catalog"),
            encoder_url: DEFAULT_ENCODER_URL.to_string(),
            scorer_url: DEFAULT_SCORER_URL.to_string(),
            remote_timeout_secs: 30,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "VITRINA_PORT";
    const ENV_BIND_ADDR: &'static str = "VITRINA_BIND_ADDR";
    const ENV_CATALOG_DIR: &'static str = "VITRINA_CATALOG_DIR";
    const ENV_ENCODER_URL: &'static str = "VITRINA_ENCODER_URL";
    const ENV_SCORER_URL: &'static str = "VITRINA_SCORER_URL";
    const ENV_REMOTE_TIMEOUT_SECS: &'static str = "VITRINA_REMOTE_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let catalog_dir = Self::parse_path_from_env(Self::ENV_CATALOG_DIR, defaults.catalog_dir);
        let encoder_url = Self::parse_string_from_env(Self::ENV_ENCODER_URL, defaults.encoder_url);
        let scorer_url = Self::parse_string_from_env(Self::ENV_SCORER_URL, defaults.scorer_url);
        let remote_timeout_secs =
            Self::parse_u64_from_env(Self::ENV_REMOTE_TIMEOUT_SECS, defaults.remote_timeout_secs);

        Ok(Self {
            port,
            bind_addr,
            catalog_dir,
            encoder_url,
            scorer_url,
            remote_timeout_secs,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog_dir.exists() && !self.catalog_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.catalog_dir.clone(),
            });
        }

        if self.remote_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                value: self.remote_timeout_secs,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
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

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
