use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse port value '{value}': {source}")]
    PortParseError {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid port: {value} (must be 1-65535)")]
    InvalidPort { value: String },

    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("path exists but is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("remote timeout must be non-zero, got {value}")]
    InvalidTimeout { value: u64 },
}
