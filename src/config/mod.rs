//! Server configuration
//!
//! Values are layered, lowest priority first:
//!
//! 1. Hardcoded defaults
//! 2. A config file (`.toml`, or `.yml`/`.yaml`)
//! 3. Environment variables (`PORT` and the `FEEDBACK_*` family)
//! 4. Command-line flags, applied by the binary
//!
//! ```rust
//! use peer_feedback::config::ServerConfig;
//!
//! let config = ServerConfig::default();
//! assert_eq!(config.port, 3000);
//! assert!(config.validate().is_ok());
//! ```


use anyhow::{anyhow, bail, Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Valid log levels for configuration validation
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Token the service ships with; only fit for local use
pub const DEFAULT_ADMIN_TOKEN: &str = "admin123";

/// Which [`FeedbackStore`](crate::storage::FeedbackStore) to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow!("Unknown storage backend: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to bind
    pub host: String,
    pub port: u16,
    /// Directory holding `feedback.json` and `submissions.json`
    pub data_dir: PathBuf,
    /// Static assets served for unmatched paths
    pub public_dir: PathBuf,
    /// Page served at `/`, relative to `public_dir`
    pub index_file: PathBuf,
    pub admin_token: String,
    pub body_limit_bytes: usize,
    /// Offset for human-readable completion times, in minutes east of UTC
    pub completion_utc_offset_minutes: i32,
    pub log_level: String,
    /// Alternative roster as a JSON array; the built-in table when unset
    pub roster_file: Option<PathBuf>,
    pub storage_backend: StorageBackend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            public_dir: PathBuf::from("public"),
            index_file: PathBuf::from("index.html"),
            admin_token: DEFAULT_ADMIN_TOKEN.to_string(),
            body_limit_bytes: 10 * 1024 * 1024,
            completion_utc_offset_minutes: 330,
            log_level: "info".to_string(),
            roster_file: None,
            storage_backend: StorageBackend::File,
        }
    }
}

impl ServerConfig {
    /// Defaults, then `path` if given, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_env_vars();
        Ok(config)
    }

    /// Parse a config file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML in {}", path.display())),
            Some("toml") | None => toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {}", path.display())),
            Some(other) => bail!("Unsupported config file extension: .{other}"),
        }
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparsable values are ignored
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FEEDBACK_HOST") {
            self.host = host;
        }

        // PORT is honoured for hosting platforms; FEEDBACK_PORT wins over it
        for key in ["PORT", "FEEDBACK_PORT"] {
            if let Some(port) = lookup(key).and_then(|v| v.parse().ok()) {
                self.port = port;
            }
        }

        if let Some(dir) = lookup("FEEDBACK_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("FEEDBACK_PUBLIC_DIR") {
            self.public_dir = PathBuf::from(dir);
        }
        if let Some(token) = lookup("FEEDBACK_ADMIN_TOKEN") {
            self.admin_token = token;
        }
        if let Some(level) = lookup("FEEDBACK_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(file) = lookup("FEEDBACK_ROSTER_FILE") {
            self.roster_file = Some(PathBuf::from(file));
        }
        if let Some(backend) = lookup("FEEDBACK_STORAGE").and_then(|v| v.parse().ok()) {
            self.storage_backend = backend;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!(
                "Invalid log level '{}', expected one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            );
        }
        if self.admin_token.trim().is_empty() {
            bail!("Admin token must not be empty");
        }
        if self.body_limit_bytes == 0 {
            bail!("Request body limit must be greater than zero");
        }
        self.completion_offset()?;
        self.socket_addr()?;
        Ok(())
    }

    pub fn completion_offset(&self) -> Result<FixedOffset> {
        self.completion_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow!(
                    "Completion UTC offset out of range: {} minutes",
                    self.completion_utc_offset_minutes
                )
            })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    pub fn uses_default_admin_token(&self) -> bool {
        self.admin_token == DEFAULT_ADMIN_TOKEN
    }
}
