//! Sanitize module: decide which image URLs may be embedded as-is.
//!
//! 1. 文字列でなければ `None`
//! 2. 除外対象（相対 URL, `data:image/*`, 同一オリジンの `blob:`）はそのまま
//! 3. 信頼ホストは `http:` を `https:` に昇格
//! 4. それ以外は画像プロキシ経由

mod config;
mod filter;

pub use config::{DEFAULT_TRUSTED_DOMAINS, Origin, SanitizerConfig};
pub use filter::SafeImageUrl;
