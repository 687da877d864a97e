// ============================
// chatter-backend/src/config/mod.rs
// ============================
//! Configuration management.
//!
//! Settings are layered, later sources overriding earlier ones:
//! built-in defaults, a TOML file, `CHATTER_*` environment variables
//! (`__` separates nested keys) and finally a bare `JWT_SECRET`.
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{MAX_SESSION_TTL, SESSION_TTL};

/// Prefix for environment overrides, e.g. `CHATTER_BIND_ADDR`
pub const ENV_PREFIX: &str = "CHATTER_";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const MAX_HASH_LOG_N: u8 = 24;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application settings
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub session_ttl_secs: u64,
    /// Upper bound for the `limit` query parameter
    pub max_page_size: u32,
    /// User store settings
    pub storage: StorageSettings,
    /// scrypt work factor
    pub password_hash: HashSettings,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Which user store backs the service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// JSON documents on disk under `path`
    #[default]
    FlatFile,
    /// Process-local, lost on restart
    Memory,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Data directory for the flat-file backend
    pub path: PathBuf,
}

/// scrypt parameters. `log_n` is the base-2 log of the CPU/memory cost.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HashSettings {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 9090)),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            jwt_secret: String::new(),
            session_ttl_secs: SESSION_TTL.as_secs(),
            max_page_size: 100,
            storage: StorageSettings::default(),
            password_hash: HashSettings::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: PathBuf::from("data"),
        }
    }
}

impl Default for HashSettings {
    fn default() -> Self {
        Self { log_n: 17, r: 8, p: 1 }
    }
}

// The secret must never end up in logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("jwt_secret", &"<redacted>")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("max_page_size", &self.max_page_size)
            .field("storage", &self.storage)
            .field("password_hash", &self.password_hash)
            .finish()
    }
}

impl Settings {
    /// Load settings from `config.toml` in the working directory and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from an explicit TOML file and the environment.
    /// A missing file is not an error; defaults apply.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Self::figment(path.as_ref()).extract()?)
    }

    /// The provider stack behind [`Settings::load_from`]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&["JWT_SECRET"]))
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "jwt_secret must be set (JWT_SECRET or CHATTER_JWT_SECRET)".to_string(),
            ));
        }

        if self.session_ttl_secs == 0 || self.session_ttl_secs > MAX_SESSION_TTL.as_secs() {
            return Err(ConfigError::Invalid(format!(
                "session_ttl_secs must be between 1 and {}",
                MAX_SESSION_TTL.as_secs()
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "log_level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }

        if self.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "max_page_size must be greater than zero".to_string(),
            ));
        }

        let cost = &self.password_hash;
        if cost.log_n == 0 || cost.log_n > MAX_HASH_LOG_N || cost.r == 0 || cost.p == 0 {
            return Err(ConfigError::Invalid(format!(
                "password_hash requires 1 <= log_n <= {MAX_HASH_LOG_N}, r >= 1, p >= 1"
            )));
        }

        Ok(())
    }
}
