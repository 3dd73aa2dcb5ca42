//! SafeImageUrl - 画像 URL を UI に埋め込める形にする
//!
//! パターンはすべて構築時に config から組み立てます（グローバル状態を読まない）。

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;
use url::Url;

use super::config::SanitizerConfig;
use crate::domain::MediaError;
use crate::impls::PhotonProxy;
use crate::ports::{ProxyOptions, ProxyRewrite};

/// Image URL safety filter.
///
/// ```
/// use mediaslice_core::{SafeImageUrl, SanitizerConfig};
///
/// let filter = SafeImageUrl::from_config(&SanitizerConfig::default()).unwrap();
/// assert_eq!(
///     filter.sanitize("http://wordpress.com/a.png").as_deref(),
///     Some("https://wordpress.com/a.png")
/// );
/// ```
pub struct SafeImageUrl {
    exempt: Regex,
    trusted_host: Option<Regex>,
    proxy: Arc<dyn ProxyRewrite>,
}

impl fmt::Debug for SafeImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeImageUrl")
            .field("exempt", &self.exempt.as_str())
            .field("trusted_host", &self.trusted_host.as_ref().map(Regex::as_str))
            .finish_non_exhaustive()
    }
}

/// Relative (not protocol-relative) URLs, inline images, and same-origin blobs.
fn exempt_pattern(config: &SanitizerConfig) -> String {
    let mut prefixes = vec![r"/([^/]|$)".to_string(), r"data:image/[^;]+;".to_string()];
    if let Some(origin) = &config.current_origin {
        prefixes.push(regex::escape(&origin.blob_prefix()));
    }
    format!("^({})", prefixes.join("|"))
}

/// Anchored "domain or any subdomain of it" match.
fn trusted_host_pattern(config: &SanitizerConfig) -> Option<String> {
    let domains: Vec<String> = config
        .trusted_domains
        .iter()
        .map(|d| d.trim().trim_matches('.').to_ascii_lowercase())
        .filter(|d| !d.is_empty())
        .map(|d| regex::escape(&d))
        .collect();
    if domains.is_empty() {
        return None;
    }
    Some(format!(r"^([-a-zA-Z0-9_]+\.)*({})$", domains.join("|")))
}

/// Hostname of an absolute or protocol-relative URL.
fn hostname(url: &str) -> Option<String> {
    let parsed = if url.starts_with("//") {
        Url::parse(&format!("http:{url}"))
    } else {
        Url::parse(url)
    };
    parsed.ok()?.host_str().map(str::to_owned)
}

impl SafeImageUrl {
    /// Build with the default Photon proxy configured from `config.proxy`.
    pub fn from_config(config: &SanitizerConfig) -> Result<Self, MediaError> {
        Self::with_proxy(config, Arc::new(PhotonProxy::new(&config.proxy)))
    }

    pub fn with_proxy(
        config: &SanitizerConfig,
        proxy: Arc<dyn ProxyRewrite>,
    ) -> Result<Self, MediaError> {
        let exempt = Regex::new(&exempt_pattern(config))?;
        let trusted_host = trusted_host_pattern(config)
            .map(|p| Regex::new(&p))
            .transpose()?;
        Ok(Self {
            exempt,
            trusted_host,
            proxy,
        })
    }

    pub fn is_exempt(&self, url: &str) -> bool {
        self.exempt.is_match(url)
    }

    pub fn is_trusted_host(&self, host: &str) -> bool {
        self.trusted_host.as_ref().is_some_and(|re| re.is_match(host))
    }

    /// Safe version of `url`, or `None` if it cannot be made safe.
    pub fn sanitize(&self, url: &str) -> Option<String> {
        if self.is_exempt(url) {
            tracing::trace!(url, "image url exempt");
            return Some(url.to_owned());
        }

        if let Some(host) = hostname(url)
            && self.is_trusted_host(&host)
        {
            tracing::trace!(url, host = %host, "image url on trusted host");
            return Some(match url.strip_prefix("http:") {
                Some(rest) => format!("https:{rest}"),
                None => url.to_owned(),
            });
        }

        let proxied = self.proxy.rewrite(url, &ProxyOptions::default());
        if proxied.is_none() {
            tracing::trace!(url, "image url rejected by proxy");
        } else {
            tracing::trace!(url, "image url proxied");
        }
        proxied
    }

    /// Like `sanitize`, for an untyped attribute: anything but a string is `None`.
    pub fn sanitize_value(&self, value: &Value) -> Option<String> {
        match value {
            Value::String(url) => self.sanitize(url),
            _ => {
                tracing::trace!(kind = ?value, "image url is not a string");
                None
            }
        }
    }
}
