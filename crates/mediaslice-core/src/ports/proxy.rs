//! ProxyRewrite port - 画像プロキシ URL への書き換え
//!
//! 信頼できないホストの画像は、プロキシ経由の URL に書き換えてから表示します。
//!
//! # 実装
//! - **PhotonProxy**（`impls::photon`）: デフォルト実装
//! - テストではクロージャをそのまま渡せます

/// Size and quality adjustments understood by the image proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
    /// Resize and crop to exactly `(w, h)`.
    pub resize: Option<(u32, u32)>,
    /// Fit within `(w, h)` keeping the aspect ratio.
    pub fit: Option<(u32, u32)>,
    /// Pad to `(w, h)` with black bars.
    pub letterboxing: Option<(u32, u32)>,
    pub remove_letterboxing: bool,
    pub zoom: Option<u8>,
    /// Raw crop spec passed through (`"x,y,w,h"`).
    pub crop: Option<String>,
    /// `"all"`, `"info"` or `"color"`.
    pub strip: Option<String>,
}

/// ProxyRewrite は任意の画像 URL をプロキシ URL に変換
///
/// `None` はプロキシがその URL を表現できないことを意味します。
pub trait ProxyRewrite: Send + Sync {
    fn rewrite(&self, url: &str, options: &ProxyOptions) -> Option<String>;
}

impl<F> ProxyRewrite for F
where
    F: Fn(&str, &ProxyOptions) -> Option<String> + Send + Sync,
{
    fn rewrite(&self, url: &str, options: &ProxyOptions) -> Option<String> {
        self(url, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_proxies() {
        let proxy = |url: &str, _: &ProxyOptions| Some(format!("proxied:{url}"));

        assert_eq!(
            proxy.rewrite("http://a.test/x.png", &ProxyOptions::default()),
            Some("proxied:http://a.test/x.png".to_string())
        );
    }
}
