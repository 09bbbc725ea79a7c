use crate::config::ClientConfig;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk configuration. Every field is optional; anything absent keeps the
/// built-in default so a deployment only overrides what it changes.
///
/// ```toml
/// [api]
/// base_url = "http://127.0.0.1:8000"
/// bind_endpoint = "http://127.0.0.1:8002/api/patient/bind-doctor/"
///
/// [trust]
/// allowed_hosts = ["127.0.0.1", "localhost"]
/// allowed_ports = ["8002", ""]
/// allowed_paths = ["/api/patient/bind-doctor/"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiSection>,
    pub trust: Option<TrustSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub bind_endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustSection {
    pub allowed_hosts: Option<Vec<String>>,
    pub allowed_ports: Option<Vec<String>>,
    pub allowed_paths: Option<Vec<String>>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn merge_into(self, mut base: ClientConfig) -> ClientConfig {
        if let Some(api) = self.api {
            if let Some(base_url) = api.base_url {
                base.api_base = base_url;
            }
            if let Some(bind_endpoint) = api.bind_endpoint {
                base.bind_endpoint = bind_endpoint;
            }
        }
        if let Some(trust) = self.trust {
            if let Some(hosts) = trust.allowed_hosts {
                base.allowed_hosts = hosts;
            }
            if let Some(ports) = trust.allowed_ports {
                base.allowed_ports = ports;
            }
            if let Some(paths) = trust.allowed_paths {
                base.allowed_paths = paths;
            }
        }
        base
    }
}
