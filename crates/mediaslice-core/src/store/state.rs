//! Media state: site -> (media id -> record).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{MediaError, MediaEvent, MediaId, MediaRecord, SiteId};

/// Records known for one site, keyed by `MediaRecord::id`.
pub type SiteMedia = BTreeMap<MediaId, MediaRecord>;

/// Canonical media data, partitioned by site.
///
/// Invariants:
/// - Within a site, keys equal the stored record's id.
/// - A missing site reads exactly like a site with no media.
/// - Only `receive` and `delete` change the mapping.
///
/// Serializes as `{"<siteId>": {"<mediaId>": record}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaState {
    items: BTreeMap<SiteId, SiteMedia>,
}

impl MediaState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a state snapshot.
    ///
    /// Entries whose key disagrees with the record's `ID` are re-keyed by `ID`.
    pub fn from_json_str(s: &str) -> Result<Self, MediaError> {
        let raw: BTreeMap<SiteId, SiteMedia> =
            serde_json::from_str(s).map_err(MediaError::InvalidSnapshot)?;
        let items = raw
            .into_iter()
            .map(|(site_id, media)| {
                let media = media
                    .into_values()
                    .map(|record| (record.id(), record))
                    .collect();
                (site_id, media)
            })
            .collect();
        Ok(Self { items })
    }

    /// Insert or replace each record under its id.
    ///
    /// Later records in the sequence win over earlier ones with the same id.
    /// Other sites are untouched.
    pub fn receive<I>(&mut self, site_id: SiteId, records: I)
    where
        I: IntoIterator<Item = MediaRecord>,
    {
        let media = self.items.entry(site_id).or_default();
        for record in records {
            media.insert(record.id(), record);
        }
    }

    /// Remove each id present for the site. Unknown ids and sites are ignored.
    pub fn delete<I>(&mut self, site_id: SiteId, media_ids: I)
    where
        I: IntoIterator<Item = MediaId>,
    {
        let Some(media) = self.items.get_mut(&site_id) else {
            return;
        };
        for media_id in media_ids {
            media.remove(&media_id);
        }
    }

    pub fn get(&self, site_id: SiteId, media_id: MediaId) -> Option<&MediaRecord> {
        self.items.get(&site_id)?.get(&media_id)
    }

    /// All records for a site, `None` if the site was never seen.
    pub fn site(&self, site_id: SiteId) -> Option<&SiteMedia> {
        self.items.get(&site_id)
    }

    /// Number of records held for a site (0 for unknown sites).
    pub fn len_for(&self, site_id: SiteId) -> usize {
        self.items.get(&site_id).map_or(0, BTreeMap::len)
    }

    pub fn sites(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.items.keys().copied()
    }

    /// Apply one event in place.
    pub fn apply(&mut self, event: &MediaEvent) {
        match event {
            MediaEvent::Received { site_id, media } => {
                tracing::debug!(site_id = %site_id, count = media.len(), "media received");
                self.receive(*site_id, media.iter().cloned());
            }
            MediaEvent::Deleted { site_id, media_ids } => {
                tracing::debug!(site_id = %site_id, count = media_ids.len(), "media deleted");
                self.delete(*site_id, media_ids.iter().copied());
            }
        }
    }

    /// `(state, event) -> state`.
    pub fn reduce(mut self, event: &MediaEvent) -> Self {
        self.apply(event);
        self
    }
}
