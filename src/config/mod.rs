//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Address the HTTP server binds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl ServerConfig {
    /// `host:port` string accepted by `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of the employee dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/employees.db.txt"),
        }
    }
}

/// Page size applied when a request gives no usable `limit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 1000,
        }
    }
}

/// Complete configuration of the directory service
///
/// Every section is optional; missing values take their defaults.
///
/// ```yaml
/// server:
///   host: 0.0.0.0
///   port: 3001
/// data:
///   path: data/employees.db.txt
/// query:
///   default_limit: 20
///   max_limit: 1000
/// static_dir: public
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub query: QueryConfig,

    /// Directory of static UI assets served for unmatched routes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl DirectoryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
