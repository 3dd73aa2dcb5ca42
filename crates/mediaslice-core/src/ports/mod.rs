//! Ports - 抽象化レイヤー
//!
//! 外部サービスへのインターフェースを trait として定義し、
//! 実装の詳細（どの画像プロキシを使うか）を隠蔽します。

pub mod proxy;

pub use self::proxy::{ProxyOptions, ProxyRewrite};
