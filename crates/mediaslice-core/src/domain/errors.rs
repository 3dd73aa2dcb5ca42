//! Errors - デコード境界と非同期ディスパッチ境界のエラー
//!
//! 状態遷移・セレクタ・URL 安全化は全域関数なので、ここには現れません。

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid media record")]
    InvalidRecord(#[source] serde_json::Error),

    #[error("invalid media event")]
    InvalidEvent(#[source] serde_json::Error),

    #[error("invalid state snapshot")]
    InvalidSnapshot(#[source] serde_json::Error),

    #[error("invalid sanitizer config")]
    Config(#[source] serde_json::Error),

    #[error("invalid URL pattern")]
    Pattern(#[from] regex::Error),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("event loop is closed")]
    ChannelClosed,

    #[error("event loop task failed")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn message_does_not_repeat_source() {
        let err = crate::domain::MediaEvent::from_json_str(r#"{"type":"MEDIA_UPDATE"}"#).unwrap_err();

        let source = err.source().expect("serde error is kept as source").to_string();
        assert_eq!(err.to_string(), "invalid media event");
        assert!(source.contains("unknown variant"), "{source}");
    }

    #[test]
    fn io_message_names_path_only() {
        let err = MediaError::Io {
            path: PathBuf::from("/tmp/x.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };

        assert_eq!(err.to_string(), "failed to read /tmp/x.json");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("gone"));
    }
}
