use crate::domain::model::EndpointComponents;
use crate::utils::error::Result;
use regex::Regex;
use std::collections::HashSet;

// Manual decomposition on purpose: a general URL parser's edge-case handling
// (backslashes, userinfo, host confusables) must not decide what we contact.
const ENDPOINT_PATTERN: &str = r"^([A-Za-z]+)://([^/:?#]+)(?::([0-9]+))?(/[^?#]*)?";

/// Fixed set of endpoint components considered safe to contact.
/// Immutable after construction; injected, never ambient.
#[derive(Debug, Clone)]
pub struct AllowList {
    hosts: HashSet<String>,
    ports: HashSet<String>,
    paths: HashSet<String>,
}

impl AllowList {
    pub fn new<H, P, Q>(hosts: H, ports: P, paths: Q) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        Q: IntoIterator,
        Q::Item: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
            ports: ports.into_iter().map(Into::into).collect(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows_host(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    /// The empty string is the "no explicit port" member.
    pub fn allows_port(&self, port: &str) -> bool {
        self.ports.contains(port)
    }

    pub fn allows_path(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(
            ["127.0.0.1", "localhost"],
            ["8002", ""],
            ["/api/patient/bind-doctor/"],
        )
    }
}

pub struct TrustValidator {
    allow: AllowList,
    pattern: Regex,
}

impl TrustValidator {
    pub fn new(allow: AllowList) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(ENDPOINT_PATTERN)?,
            allow,
        })
    }

    /// Split a candidate endpoint into scheme/host/port/path. None when the
    /// string does not even have the expected shape.
    pub fn decompose(&self, candidate: &str) -> Option<EndpointComponents> {
        let caps = self.pattern.captures(candidate)?;
        Some(EndpointComponents {
            scheme: caps[1].to_ascii_lowercase(),
            host: caps[2].to_string(),
            port: caps.get(3).map(|m| m.as_str()).unwrap_or("").to_string(),
            path: caps.get(4).map(|m| m.as_str()).unwrap_or("/").to_string(),
        })
    }

    /// The trust gate. Every component must pass exactly; anything that does
    /// not decompose is rejected (fail closed).
    pub fn trust(&self, candidate: &str) -> bool {
        let Some(parts) = self.decompose(candidate) else {
            return false;
        };

        let scheme_ok = parts.scheme == "http" || parts.scheme == "https";
        let host_ok = self.allow.allows_host(&parts.host);
        let port_ok = self.allow.allows_port(&parts.port);
        let path_ok = self.allow.allows_path(&parts.path);

        scheme_ok && host_ok && port_ok && path_ok
    }
}
