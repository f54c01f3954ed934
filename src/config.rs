//! Deployment configuration.
//!
//! Resolved once before a run starts; the engine never mutates it.
//! `local_dir` and `remote_dir` act as prefixes for the upload path rewrite,
//! so their trailing separators are significant.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::deploy::exclude::ExcludePatterns;

/// Path filter predicate. Receives the enumerated path string and returns
/// whether the entry should be kept for upload.
pub type PathFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Connection parameters for the remote store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Connection-ready timeout in milliseconds. Applies to session
    /// establishment only, not to individual remote operations.
    pub ready_timeout_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "192.168.0.1".to_string(),
            port: 22,
            username: "username".to_string(),
            password: "password".to_string(),
            ready_timeout_ms: 20_000,
        }
    }
}

/// Configuration for one deployment run.
#[derive(Clone)]
pub struct DeployConfig {
    /// Root of the local tree being mirrored, e.g. `./dist/`.
    pub local_dir: String,
    /// Remote directory that is cleared and repopulated, e.g. `/www/`.
    pub remote_dir: String,
    pub connection: ConnectionConfig,
    /// Glob patterns dropped from the enumerated tree before the filter runs.
    pub exclude: ExcludePatterns,
    /// Optional predicate applied to every enumerated path.
    pub filter: Option<PathFilter>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            local_dir: "./dist/".to_string(),
            remote_dir: "/www/".to_string(),
            connection: ConnectionConfig::default(),
            exclude: ExcludePatterns::with_defaults(),
            filter: None,
        }
    }
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("local_dir", &self.local_dir)
            .field("remote_dir", &self.remote_dir)
            .field("connection", &self.connection)
            .field("exclude", &self.exclude)
            .field("filter", &self.filter.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

/// On-disk configuration file contents (`deploy.toml`).
///
/// Every field is optional; missing fields keep their defaults. The filter
/// predicate has no file representation and is library-API-only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub local_dir: Option<String>,
    pub remote_dir: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ready_timeout_ms: Option<u64>,
    pub exclude: Vec<String>,
}

impl DeployConfig {
    /// Load configuration from a TOML file, starting from defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let file: FileConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Self::default().merged(file)
    }

    /// Overlay on-disk values onto this configuration.
    pub fn merged(mut self, file: FileConfig) -> Result<Self> {
        if let Some(local_dir) = file.local_dir {
            self.local_dir = local_dir;
        }
        if let Some(remote_dir) = file.remote_dir {
            self.remote_dir = remote_dir;
        }
        if let Some(host) = file.host {
            self.connection.host = host;
        }
        if let Some(port) = file.port {
            self.connection.port = port;
        }
        if let Some(username) = file.username {
            self.connection.username = username;
        }
        if let Some(password) = file.password {
            self.connection.password = password;
        }
        if let Some(timeout) = file.ready_timeout_ms {
            self.connection.ready_timeout_ms = timeout;
        }
        if !file.exclude.is_empty() {
            let patterns: Vec<&str> = file.exclude.iter().map(|s| s.as_str()).collect();
            self.exclude = ExcludePatterns::from_patterns(&patterns)
                .context("Invalid exclude pattern in config file")?;
        }
        Ok(self)
    }

    /// Attach a path filter predicate.
    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}
