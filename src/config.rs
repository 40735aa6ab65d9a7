//! Process configuration for the word server and client.
//!
//! Both binaries read the same JSON configuration file (default
//! `config.json`). Every key is optional at parse time; each process asks
//! for the keys it needs through the accessor methods, which turn a missing
//! or unusable key into a [`ConfigError`]. Startup is the only consumer, so
//! every error here is fatal to the owning process.
//!
//! Recognized keys:
//!
//! - `server_ip`: address the server binds to / the client connects to.
//! - `server_port`: TCP port, paired with `server_ip`.
//! - `filename`: path to the word source file (server only).
//! - `k`: page size, number of words requested per exchange (client only).
//! - `p`: initial offset into the word sequence (client only).
use std::{
    fs,
    io,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing required config key '{0}'")]
    MissingKey(&'static str),

    #[error("invalid value for config key '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Parsed configuration file contents.
///
/// Fields mirror the file keys one to one; validation happens in the
/// accessors so the server and client can require different subsets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub server_ip: Option<String>,
    pub server_port: Option<u16>,
    pub filename: Option<PathBuf>,
    pub k: Option<i64>,
    pub p: Option<i64>,
}

impl Config {
    /// Load and parse the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Socket address built from `server_ip` and `server_port`.
    pub fn server_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .server_ip
            .as_deref()
            .ok_or(ConfigError::MissingKey("server_ip"))?;
        let port = self.server_port.ok_or(ConfigError::MissingKey("server_port"))?;

        let ip: IpAddr = ip.parse().map_err(|_| ConfigError::InvalidValue {
            key: "server_ip",
            reason: format!("'{ip}' is not a valid IP address"),
        })?;
        Ok(SocketAddr::new(ip, port))
    }

    /// Path to the word source file (`filename`).
    pub fn source_path(&self) -> Result<&Path, ConfigError> {
        self.filename
            .as_deref()
            .ok_or(ConfigError::MissingKey("filename"))
    }

    /// Page size (`k`); must be a positive integer.
    pub fn page_size(&self) -> Result<usize, ConfigError> {
        let k = self.k.ok_or(ConfigError::MissingKey("k"))?;
        if k <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "k",
                reason: format!("page size must be positive, got {k}"),
            });
        }
        Ok(k as usize)
    }

    /// Initial offset (`p`); must be non-negative.
    pub fn initial_offset(&self) -> Result<usize, ConfigError> {
        let p = self.p.ok_or(ConfigError::MissingKey("p"))?;
        if p < 0 {
            return Err(ConfigError::InvalidValue {
                key: "p",
                reason: format!("offset must be non-negative, got {p}"),
            });
        }
        Ok(p as usize)
    }
}
