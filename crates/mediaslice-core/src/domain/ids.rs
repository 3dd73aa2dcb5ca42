//! Domain identifiers (strongly-typed IDs).
//!
//! サイト ID とメディア ID はどちらも整数ですが、取り違えるとサイト間で
//! メディアが混ざります。Phantom type パターンで別の型として扱います。
//!
//! ## Phantom Type パターン
//! `Id<T>` というジェネリック型で共通実装を提供しつつ、
//! `T` は実行時には使わない（PhantomData）マーカー型として、
//! コンパイル時の型安全性を提供します。
//!
//! JSON 上は素の整数として読み書きします（`#[serde(transparent)]`）。
//! state のキーとして使う場合は serde_json が文字列キー `"42"` に変換します。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"site-", "media-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// # 例
/// ```
/// use mediaslice_core::domain::{MediaId, SiteId};
///
/// let site = SiteId::new(2916284);
/// let media = MediaId::new(42);
/// assert_eq!(site.to_string(), "site-2916284");
/// assert_eq!(media.get(), 42);
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    value: u64,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(&self) -> u64 {
        self.value
    }
}

impl<T: IdMarker> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Site のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Site {}

impl IdMarker for Site {
    fn prefix() -> &'static str {
        "site-"
    }
}

/// Media のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Media {}

impl IdMarker for Media {
    fn prefix() -> &'static str {
        "media-"
    }
}

/// Identifier of a site (the tenant media records are partitioned by).
pub type SiteId = Id<Site>;

/// Identifier of a media record, unique within its site.
pub type MediaId = Id<Media>;
