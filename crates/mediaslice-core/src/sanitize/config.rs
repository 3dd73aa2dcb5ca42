//! Sanitizer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::MediaError;
use crate::impls::PhotonConfig;

/// Platform-owned and partner domains served over TLS.
pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &["gravatar.com", "wordpress.com", "wp.com", "a8c.com"];

/// Origin of the page the filter runs in.
///
/// `protocol` follows the browser `location.protocol` shape (`"https:"`);
/// a missing trailing colon is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub protocol: String,
    pub hostname: String,
    #[serde(default)]
    pub port: Option<u16>,
}

impl Origin {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
            port,
        }
    }

    /// Parse `scheme://host[:port]`. Default ports are left implicit.
    pub fn parse(s: &str) -> Option<Self> {
        let url = Url::parse(s).ok()?;
        let hostname = url.host_str()?.to_owned();
        Some(Self::new(format!("{}:", url.scheme()), hostname, url.port()))
    }

    /// Prefix every same-origin blob URL starts with: `blob:https://host:port/`.
    pub fn blob_prefix(&self) -> String {
        let protocol = self.protocol.trim_end_matches(':');
        match self.port {
            Some(port) => format!("blob:{protocol}://{}:{port}/", self.hostname),
            None => format!("blob:{protocol}://{}/", self.hostname),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Hosts passed through (scheme upgraded); subdomains included.
    pub trusted_domains: Vec<String>,

    /// Present only in a browser-like context; enables the blob exemption.
    pub current_origin: Option<Origin>,

    pub proxy: PhotonConfig,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            trusted_domains: DEFAULT_TRUSTED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            current_origin: None,
            proxy: PhotonConfig::default(),
        }
    }
}

impl SanitizerConfig {
    pub fn from_json_str(s: &str) -> Result<Self, MediaError> {
        serde_json::from_str(s).map_err(MediaError::Config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MediaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MediaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.current_origin = Some(origin);
        self
    }
}
