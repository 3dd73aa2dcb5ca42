//! MediaSlice - 共有される media state のハンドル

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{MediaError, MediaEvent, MediaId, MediaRecord, SiteId};
use crate::sanitize::{SafeImageUrl, SanitizerConfig};
use crate::selectors;
use crate::store::MediaState;

/// Shared media state plus the URL filter its selectors use.
///
/// - `dispatch` applies one transition under the write lock, so a transition
///   is never observed half-applied.
/// - Reads return owned values; no lock escapes.
#[derive(Clone)]
pub struct MediaSlice {
    state: Arc<RwLock<MediaState>>,
    filter: Arc<SafeImageUrl>,
}

impl MediaSlice {
    pub fn new(filter: SafeImageUrl) -> Self {
        Self::with_state(MediaState::new(), filter)
    }

    pub fn with_state(state: MediaState, filter: SafeImageUrl) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            filter: Arc::new(filter),
        }
    }

    pub fn from_config(config: &SanitizerConfig) -> Result<Self, MediaError> {
        Ok(Self::new(SafeImageUrl::from_config(config)?))
    }

    pub async fn dispatch(&self, event: &MediaEvent) {
        let mut state = self.state.write().await;
        state.apply(event);
    }

    pub async fn media_item(&self, site_id: SiteId, media_id: MediaId) -> Option<MediaRecord> {
        let state = self.state.read().await;
        selectors::get_media_item(&state, site_id, media_id).cloned()
    }

    pub async fn media_url(&self, site_id: SiteId, media_id: MediaId) -> Option<String> {
        let state = self.state.read().await;
        selectors::get_media_url(&state, &self.filter, site_id, media_id)
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> MediaState {
        self.state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: SiteId = SiteId::new(2916284);

    fn slice() -> MediaSlice {
        MediaSlice::from_config(&SanitizerConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn dispatch_then_read() {
        let slice = slice();
        let record = MediaRecord::new(MediaId::new(42))
            .with_attribute("URL", "http://example.files.wordpress.com/flower.gif");

        slice.dispatch(&MediaEvent::receive(SITE, record.clone())).await;

        assert_eq!(slice.media_item(SITE, MediaId::new(42)).await, Some(record));
        assert_eq!(
            slice.media_url(SITE, MediaId::new(42)).await.as_deref(),
            Some("https://example.files.wordpress.com/flower.gif")
        );
    }

    #[tokio::test]
    async fn clones_share_state() {
        let a = slice();
        let b = a.clone();

        a.dispatch(&MediaEvent::receive(SITE, MediaRecord::new(MediaId::new(1))))
            .await;
        assert!(b.media_item(SITE, MediaId::new(1)).await.is_some());

        b.dispatch(&MediaEvent::delete(SITE, MediaId::new(1))).await;
        assert!(a.media_item(SITE, MediaId::new(1)).await.is_none());
    }

    #[tokio::test]
    async fn snapshot_is_detached() {
        let slice = slice();
        let before = slice.snapshot().await;

        slice
            .dispatch(&MediaEvent::receive(SITE, MediaRecord::new(MediaId::new(1))))
            .await;

        assert_eq!(before, MediaState::new());
        assert_eq!(slice.snapshot().await.len_for(SITE), 1);
    }
}
