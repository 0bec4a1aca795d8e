//! Layered server configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults,
//! 2. an optional TOML file (`todo-server.toml`, or the path in `TODO_CONFIG`),
//! 3. environment variables prefixed `TODO__` using `__` as the nesting
//!    separator (`TODO__SERVER__PORT=8080` sets `server.port`),
//! 4. the bare `PORT` variable, which overrides `server.port`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "todo-server.toml";
pub const CONFIG_PATH_ENV: &str = "TODO_CONFIG";
const ENV_PREFIX: &str = "TODO";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Database file, used by the SQLite backend only.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from("todo.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Loads the configuration from the default file location and the process
/// environment.
pub fn load() -> Result<AppConfig, config::ConfigError> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    load_from(Path::new(&path), std::env::var("PORT").ok())
}

/// Loads the configuration from `path` (optional on disk) and `TODO__*`
/// variables, with `port_override` applied last.
pub fn load_from(
    path: &Path,
    port_override: Option<String>,
) -> Result<AppConfig, config::ConfigError> {
    info!(path = %path.display(), "loading configuration");

    Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("server.port", port_override)?
        .build()?
        .try_deserialize()
}
