//! PhotonProxy - wp.com 画像プロキシへの書き換え
//!
//! `http(s)://example.com/a.png` を `https://i{n}.wp.com/example.com/a.png` に変換します。
//! シャード番号 `n` は `host + path` の SHA-256 から決定的に選ぶので、
//! 同じ画像は常に同じホストに振り分けられます（キャッシュが効く）。

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;
use url::form_urlencoded;

use crate::ports::{ProxyOptions, ProxyRewrite};

const PROXY_DOMAIN: &str = "wp.com";

fn default_hosts() -> u8 {
    3
}

/// Proxy settings, part of `SanitizerConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotonConfig {
    /// Number of shard hosts (`i0` .. `i{hosts-1}`).
    #[serde(default = "default_hosts")]
    pub hosts: u8,
}

impl Default for PhotonConfig {
    fn default() -> Self {
        Self {
            hosts: default_hosts(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhotonProxy {
    hosts: u8,
}

impl PhotonProxy {
    pub fn new(config: &PhotonConfig) -> Self {
        Self {
            hosts: config.hosts.max(1),
        }
    }

    fn shard_host(&self, pathname: &str) -> String {
        let digest = Sha256::digest(pathname.as_bytes());
        format!("i{}.{}", digest[0] % self.hosts, PROXY_DOMAIN)
    }
}

impl Default for PhotonProxy {
    fn default() -> Self {
        Self::new(&PhotonConfig::default())
    }
}

/// `i0.wp.com`, `i1.wp.com`, ...
fn is_proxy_host(host: &str) -> bool {
    host.strip_suffix(PROXY_DOMAIN)
        .and_then(|rest| rest.strip_suffix('.'))
        .and_then(|shard| shard.strip_prefix('i'))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Absolute or protocol-relative URL.
fn parse_source(url: &str) -> Option<Url> {
    let parsed = if url.starts_with("//") {
        Url::parse(&format!("http:{url}"))
    } else {
        Url::parse(url)
    };
    parsed.ok().filter(|u| matches!(u.scheme(), "http" | "https"))
}

fn pair(a: u32, b: u32) -> String {
    format!("{a},{b}")
}

/// Query parameters for `options`, in a fixed order.
fn option_pairs(options: &ProxyOptions) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(w) = options.width {
        pairs.push(("w", w.to_string()));
    }
    if let Some(h) = options.height {
        pairs.push(("h", h.to_string()));
    }
    if let Some(q) = options.quality {
        pairs.push(("quality", q.to_string()));
    }
    if let Some((w, h)) = options.resize {
        pairs.push(("resize", pair(w, h)));
    }
    if let Some((w, h)) = options.fit {
        pairs.push(("fit", pair(w, h)));
    }
    if let Some((w, h)) = options.letterboxing {
        pairs.push(("lb", pair(w, h)));
    }
    if options.remove_letterboxing {
        pairs.push(("ulb", "true".to_string()));
    }
    if let Some(z) = options.zoom {
        pairs.push(("zoom", z.to_string()));
    }
    if let Some(crop) = &options.crop {
        pairs.push(("crop", crop.clone()));
    }
    if let Some(strip) = &options.strip {
        pairs.push(("strip", strip.clone()));
    }
    pairs
}

/// Apply `options` on top of existing parameters: same key replaces, new key appends.
fn merge_options(query: &mut Vec<(String, String)>, options: &ProxyOptions) {
    for (key, value) in option_pairs(options) {
        match query.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value,
            None => query.push((key.to_string(), value)),
        }
    }
}

impl ProxyRewrite for PhotonProxy {
    fn rewrite(&self, url: &str, options: &ProxyOptions) -> Option<String> {
        let source = parse_source(url)?;
        let host = source.host_str()?;

        let mut query: Vec<(String, String)> = Vec::new();
        let base = if is_proxy_host(host) {
            query.extend(source.query_pairs().into_owned());
            format!("https://{host}{}", source.path())
        } else {
            // The proxied path cannot carry the source's own query string.
            if source.query().is_some() {
                return None;
            }
            let pathname = format!("/{host}{}", source.path());
            if source.scheme() == "https" {
                query.push(("ssl".to_string(), "1".to_string()));
            }
            format!("https://{}{pathname}", self.shard_host(&pathname))
        };
        merge_options(&mut query, options);

        if query.is_empty() {
            return Some(base);
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&query)
            .finish();
        Some(format!("{base}?{query}"))
    }
}
