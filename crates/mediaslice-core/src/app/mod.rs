//! App - アプリケーション層
//!
//! store と sanitize を組み合わせ、アプリ全体から共有できる形にします。
//!
//! # 主要コンポーネント
//! - **MediaSlice**: 状態ハンドル + URL フィルタ（dispatch / 読み取り）
//! - **EventLoop**: イベントを受信順に 1 件ずつ適用するループ

pub mod event_loop;
pub mod slice;

pub use self::event_loop::{EventLoop, EventSender};
pub use self::slice::MediaSlice;
