//! Server configuration.
//!
//! Resolution order: built-in defaults, then an optional TOML file, then
//! `GUROBI_*` environment variables. CLI flags are applied last by the binary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_BIND_ADDRESS: &str = "GUROBI_BIND_ADDRESS";
pub const ENV_PORT: &str = "GUROBI_PORT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (default: "127.0.0.1"; use "0.0.0.0" to listen on all interfaces)
    pub bind_address: String,
    /// Port to listen on
    pub port: u16,
    /// Permissive CORS layer
    pub enable_cors: bool,
    /// Per-request tracing spans
    pub enable_tracing: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            enable_cors: false,
            enable_tracing: true,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `GUROBI_BIND_ADDRESS` / `GUROBI_PORT` from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
            if addr.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: ENV_BIND_ADDRESS.to_string(),
                    value: addr,
                });
            }
            self.bind_address = addr;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }
        Ok(self)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
