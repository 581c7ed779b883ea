// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory holding the database file | `./data` |
//! | `JWT_SECRET` | HS256 token signing secret | Generated at startup |
//! | `BCRYPT_COST` | bcrypt work factor for new password hashes | `12` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{net::SocketAddr, path::PathBuf};

use crate::{auth::SigningSecret, logging::LogFormat, storage::DATABASE_FILE};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the data directory path.
///
/// The redb database is created at `$DATA_DIR/quill.redb`.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the token signing secret.
///
/// When unset, a random secret is generated at startup and every issued
/// token becomes invalid on restart.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

pub const BCRYPT_COST_ENV: &str = "BCRYPT_COST";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Range of work factors bcrypt accepts.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// `None` means a secret must be generated
    pub jwt_secret: Option<SigningSecret>,
    pub bcrypt_cost: u32,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            jwt_secret: None,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid(PORT_ENV, format!("{raw:?}: {e}")))?,
            None => defaults.port,
        };

        let jwt_secret = match lookup(JWT_SECRET_ENV) {
            Some(raw) if raw.is_empty() => {
                return Err(ConfigError::invalid(JWT_SECRET_ENV, "must not be empty"));
            }
            Some(raw) => Some(SigningSecret::from_bytes(raw.into_bytes())),
            None => None,
        };

        let bcrypt_cost = match lookup(BCRYPT_COST_ENV) {
            Some(raw) => {
                let cost = raw
                    .parse::<u32>()
                    .map_err(|e| ConfigError::invalid(BCRYPT_COST_ENV, format!("{raw:?}: {e}")))?;
                if !BCRYPT_COST_RANGE.contains(&cost) {
                    return Err(ConfigError::invalid(
                        BCRYPT_COST_ENV,
                        format!("{cost} is outside {BCRYPT_COST_RANGE:?}"),
                    ));
                }
                cost
            }
            None => defaults.bcrypt_cost,
        };

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_ENV, e))?,
            None => defaults.log_format,
        };

        Ok(Self {
            host: lookup(HOST_ENV).unwrap_or(defaults.host),
            port,
            data_dir: lookup(DATA_DIR_ENV).map(PathBuf::from).unwrap_or(defaults.data_dir),
            jwt_secret,
            bcrypt_cost,
            log_format,
        })
    }

    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid(HOST_ENV, format!("{:?}: {e}", self.host)))
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}
