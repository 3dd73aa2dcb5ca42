//! mediaslice-core
//!
//! Media state slice for the admin console: a per-site media store driven by
//! receive/delete events, read-side selectors, and the image URL safety filter.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, record, events, errors）
//! - **store**: MediaState と状態遷移（receive / delete / reduce）
//! - **sanitize**: 画像 URL の安全化（SafeImageUrl, Origin, SanitizerConfig）
//! - **ports**: 抽象化レイヤー（ProxyRewrite）
//! - **impls**: ports の実装（PhotonProxy）
//! - **selectors**: 読み取り専用アクセサ（get_media_item, get_media_url）
//! - **app**: 共有ハンドルとイベントループ（MediaSlice, event_loop）

pub mod domain;
pub mod store;
pub mod sanitize;
pub mod ports;
pub mod impls;
pub mod selectors;
pub mod app;

pub use domain::{MediaError, MediaEvent, MediaId, MediaRecord, SiteId};
pub use sanitize::{Origin, SafeImageUrl, SanitizerConfig};
pub use selectors::{get_media_item, get_media_url};
pub use store::MediaState;
