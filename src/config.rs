//! Runtime configuration loaded from the environment.
//!
//! A `.env` file in the working directory is read first (if present), then
//! `DATABASE_URI`, `HOST` and `PORT` are taken from the process environment.

use crate::error::{AuctionError, Result};
use crate::{DATABASE_URI_ENV_VAR, HOST_ENV_VAR, PORT_ENV_VAR};
use dirs::data_dir;
use std::fmt;
use std::path::PathBuf;

#[cfg(test)]
mod tests;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Parse a database URI.
    ///
    /// Follows SQLAlchemy's sqlite URLs: `sqlite:///auction.db` is relative to
    /// the working directory, `sqlite:////abs/auction.db` is absolute, and
    /// `sqlite://` or `sqlite:///:memory:` is in-memory. `:memory:`,
    /// `sqlite:<path>` and bare filesystem paths are also accepted. Query
    /// strings such as `?mode=rwc` are ignored.
    pub fn parse(uri: &str) -> Result<Self> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(AuctionError::Config {
                message: format!("{} is empty", DATABASE_URI_ENV_VAR),
            });
        }

        let uri = uri.split_once('?').map_or(uri, |(path, _)| path);

        if uri == ":memory:" || uri == "sqlite::memory:" {
            return Ok(DatabaseLocation::Memory);
        }

        if let Some(rest) = uri.strip_prefix("sqlite://") {
            return match rest.strip_prefix('/') {
                None if rest.is_empty() => Ok(DatabaseLocation::Memory),
                None => Err(AuctionError::Config {
                    message: format!(
                        "sqlite URI {} has a host part, use sqlite:///relative.db or sqlite:////absolute.db",
                        uri
                    ),
                }),
                Some("") | Some(":memory:") => Ok(DatabaseLocation::Memory),
                Some(path) => Ok(DatabaseLocation::File(PathBuf::from(path))),
            };
        }

        if let Some(path) = uri.strip_prefix("sqlite:") {
            return Ok(DatabaseLocation::File(PathBuf::from(path)));
        }

        if let Some((scheme, _)) = uri.split_once("://") {
            return Err(AuctionError::Config {
                message: format!("unsupported database scheme '{}', only sqlite is available", scheme),
            });
        }

        Ok(DatabaseLocation::File(PathBuf::from(uri)))
    }

    /// Platform default: `<data dir>/cricket-auction/auction.db`.
    pub fn default_file() -> Result<Self> {
        let data_dir = data_dir().ok_or_else(|| AuctionError::Config {
            message: "Could not determine data directory".to_string(),
        })?;
        Ok(DatabaseLocation::File(
            data_dir.join("cricket-auction").join("auction.db"),
        ))
    }
}

impl fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseLocation::Memory => write!(f, "sqlite::memory:"),
            DatabaseLocation::File(path) => write!(f, "sqlite:///{}", path.display()),
        }
    }
}

/// Settings for the database and the development server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseLocation,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Load `.env` (if any) and read the environment.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(AuctionError::Config {
                    message: format!("failed to read .env: {}", e),
                })
            }
        }
        Self::from_env()
    }

    /// Read configuration from the process environment only.
    pub fn from_env() -> Result<Self> {
        let database = match non_empty_var(DATABASE_URI_ENV_VAR) {
            Some(uri) => DatabaseLocation::parse(&uri)?,
            None => {
                let fallback = DatabaseLocation::default_file()?;
                tracing::warn!(
                    "{} not set, using {}",
                    DATABASE_URI_ENV_VAR,
                    fallback
                );
                fallback
            }
        };

        let host = non_empty_var(HOST_ENV_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match non_empty_var(PORT_ENV_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| AuctionError::Config {
                message: format!("{} must be a port number, got '{}'", PORT_ENV_VAR, raw),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database,
            host,
            port,
        })
    }

    /// Replace host and port with any values given on the command line.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// `host:port` for the server listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}
