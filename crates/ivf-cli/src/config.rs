//! Server configuration.
//!
//! Precedence: `--addr` flag > `IVF_ADDR` env > TOML file > built-in default.
//! The file comes from `--config` or `IVF_CONFIG`; a missing file is an error
//! only when one was named explicitly.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:8080".
    pub addr: String,
    /// Attach a permissive CORS layer (lets other origins call /api/score).
    /// Off unless the config file turns it on.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            cors: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config file")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Load from an explicit path, else from `IVF_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("IVF_CONFIG").ok().map(PathBuf::from));
        match path {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolve the listen address from the flag, `IVF_ADDR`, then the file.
    pub fn listen_addr(&self, flag: Option<&str>) -> Result<SocketAddr> {
        let env = std::env::var("IVF_ADDR").ok();
        resolve_addr(flag, env.as_deref(), &self.server.addr)
    }
}

fn resolve_addr(flag: Option<&str>, env: Option<&str>, file: &str) -> Result<SocketAddr> {
    let raw = flag.or(env).unwrap_or(file);
    raw.parse::<SocketAddr>()
        .with_context(|| format!("invalid listen address '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.addr, DEFAULT_ADDR);
        assert!(!cfg.server.cors);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg = Config::from_toml_str("[server]\ncors = true\n").unwrap();
        assert_eq!(cfg.server.addr, DEFAULT_ADDR);
        assert!(cfg.server.cors);

        let empty = Config::from_toml_str("").unwrap();
        assert_eq!(empty.server.addr, DEFAULT_ADDR);
        assert!(!empty.server.cors);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_toml_str("[server]\nport = 80\n").is_err());
    }

    #[test]
    fn test_addr_precedence() {
        let file = "127.0.0.1:3000";
        assert_eq!(
            resolve_addr(Some("127.0.0.1:9000"), Some("127.0.0.1:8000"), file).unwrap(),
            "127.0.0.1:9000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            resolve_addr(None, Some("127.0.0.1:8000"), file).unwrap(),
            "127.0.0.1:8000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            resolve_addr(None, None, file).unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_bad_addr() {
        let err = resolve_addr(Some("localhost"), None, DEFAULT_ADDR).unwrap_err();
        assert!(err.to_string().contains("localhost"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ivf.toml");
        std::fs::write(&path, "[server]\naddr = \"0.0.0.0:8080\"\n").unwrap();
        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.server.addr, "0.0.0.0:8080");

        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }
}
