//! EventLoop - 単一の順序付きイベントストリーム
//!
//! 送信側はいくつあってもよいが、適用は 1 本のタスクが受信順に 1 件ずつ行う。
//! すべての `EventSender` が drop されるとループは終了する。

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::MediaSlice;
use crate::domain::{MediaError, MediaEvent};

/// Cloneable producer side of the event stream.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<MediaEvent>,
}

impl EventSender {
    /// Queue an event; waits while the buffer is full.
    pub async fn send(&self, event: MediaEvent) -> Result<(), MediaError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| MediaError::ChannelClosed)
    }
}

/// Event loop handle.
/// - `sender()` で送信側を増やせる
/// - `finish()` で自分の送信側を drop し、適用件数を受け取る
pub struct EventLoop {
    sender: EventSender,
    join: JoinHandle<usize>,
}

impl EventLoop {
    /// Spawn the loop on the current tokio runtime.
    pub fn spawn(slice: MediaSlice, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let join = tokio::spawn(run(slice, rx));
        Self {
            sender: EventSender { tx },
            join,
        }
    }

    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Close this handle's sender and wait until every queued event is applied.
    ///
    /// Returns once all other senders are dropped too.
    pub async fn finish(self) -> Result<usize, MediaError> {
        drop(self.sender);
        Ok(self.join.await?)
    }
}

async fn run(slice: MediaSlice, mut rx: mpsc::Receiver<MediaEvent>) -> usize {
    let mut applied = 0;
    while let Some(event) = rx.recv().await {
        slice.dispatch(&event).await;
        applied += 1;
    }
    tracing::debug!(applied, "media event loop stopped");
    applied
}
