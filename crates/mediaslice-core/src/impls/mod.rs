//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **PhotonProxy**: wp.com の画像プロキシ（Photon）向け ProxyRewrite

pub mod photon;

pub use self::photon::{PhotonConfig, PhotonProxy};
