pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

use crate::core::trust::AllowList;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_list, validate_url, Validate};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_BIND_ENDPOINT: &str = "http://127.0.0.1:8002/api/patient/bind-doctor/";

/// Resolved process-wide configuration: backend base URL, default bind
/// endpoint, and the endpoint allow-list. Built once at startup from
/// defaults, an optional TOML file, and CLI overrides; immutable afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub bind_endpoint: String,
    pub allowed_hosts: Vec<String>,
    pub allowed_ports: Vec<String>,
    pub allowed_paths: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            bind_endpoint: DEFAULT_BIND_ENDPOINT.to_string(),
            allowed_hosts: vec!["127.0.0.1".to_string(), "localhost".to_string()],
            allowed_ports: vec!["8002".to_string(), String::new()],
            allowed_paths: vec!["/api/patient/bind-doctor/".to_string()],
        }
    }
}

impl ClientConfig {
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(
            self.allowed_hosts.iter().cloned(),
            self.allowed_ports.iter().cloned(),
            self.allowed_paths.iter().cloned(),
        )
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_url("bind_endpoint", &self.bind_endpoint)?;
        validate_non_empty_list("allowed_hosts", &self.allowed_hosts)?;
        // 空字串是合法成員（代表未指定端口），所以只檢查列表本身
        validate_non_empty_list("allowed_ports", &self.allowed_ports)?;
        validate_non_empty_list("allowed_paths", &self.allowed_paths)?;
        Ok(())
    }
}
