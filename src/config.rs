use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::cli::Args;

/// Server configuration
///
/// ```yaml
/// server:
///   host: 0.0.0.0
///   port: 8080
///   root: /srv/www
///   name: Webs
/// log:
///   level: debug
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Served directory; the working directory when unset
    pub root: Option<PathBuf>,
    /// Sent in the `Server` header
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            root: None,
            name: "Webs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid configuration")
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
    }

    /// Defaults, overlaid with the config file named in `args`, overlaid with the flags themselves.
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(host) = &args.host {
            cfg.server.host = host.clone();
        }
        if let Some(port) = args.port {
            cfg.server.port = port;
        }
        if let Some(root) = &args.root {
            cfg.server.root = Some(root.clone());
        }
        if let Some(name) = &args.name {
            cfg.server.name = name.clone();
        }

        Ok(cfg)
    }

    /// The configured root, or the current working directory.
    pub fn root_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.server.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir().context("cannot determine working directory"),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
