//! Events - メディア状態を変更する 2 種類のイベント
//!
//! 取得側（外部の fetch/sync コンポーネント）やユーザー操作がイベントを発行し、
//! store はそれを 1 件ずつ適用します。
//!
//! # ワイヤ形式（JSON）
//! - `{"type":"MEDIA_RECEIVE","siteId":1,"media":[{"ID":42,...}]}`
//! - `{"type":"MEDIA_DELETE","siteId":1,"mediaIds":[42]}`

use serde::{Deserialize, Serialize};

use super::{MediaError, MediaId, MediaRecord, SiteId};

/// A single value or a list of values, normalized to a list.
///
/// Action creators accept either shape, matching how callers hand over
/// "one id" or "some ids".
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

macro_rules! one_or_many_from {
    ($ty:ty) => {
        impl From<$ty> for OneOrMany<$ty> {
            fn from(value: $ty) -> Self {
                OneOrMany::One(value)
            }
        }

        impl From<Vec<$ty>> for OneOrMany<$ty> {
            fn from(values: Vec<$ty>) -> Self {
                OneOrMany::Many(values)
            }
        }

        impl<const N: usize> From<[$ty; N]> for OneOrMany<$ty> {
            fn from(values: [$ty; N]) -> Self {
                OneOrMany::Many(values.into())
            }
        }
    };
}

one_or_many_from!(MediaId);
one_or_many_from!(MediaRecord);

/// MediaEvent はメディア状態への変更要求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MediaEvent {
    /// Records fetched for a site; inserted or replaced by ID.
    #[serde(rename = "MEDIA_RECEIVE", rename_all = "camelCase")]
    Received {
        site_id: SiteId,
        media: Vec<MediaRecord>,
    },

    /// Ids removed from a site; unknown ids are ignored.
    #[serde(rename = "MEDIA_DELETE", rename_all = "camelCase")]
    Deleted {
        site_id: SiteId,
        media_ids: Vec<MediaId>,
    },
}

impl MediaEvent {
    /// Action creator for received media (one record or a list).
    pub fn receive(site_id: SiteId, media: impl Into<OneOrMany<MediaRecord>>) -> Self {
        MediaEvent::Received {
            site_id,
            media: media.into().into_vec(),
        }
    }

    /// Action creator for deleted media (one id or a list).
    pub fn delete(site_id: SiteId, media_ids: impl Into<OneOrMany<MediaId>>) -> Self {
        MediaEvent::Deleted {
            site_id,
            media_ids: media_ids.into().into_vec(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, MediaError> {
        serde_json::from_str(s).map_err(MediaError::InvalidEvent)
    }

    pub fn site_id(&self) -> SiteId {
        match self {
            MediaEvent::Received { site_id, .. } | MediaEvent::Deleted { site_id, .. } => *site_id,
        }
    }

    /// Event type name as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            MediaEvent::Received { .. } => "MEDIA_RECEIVE",
            MediaEvent::Deleted { .. } => "MEDIA_DELETE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SITE: SiteId = SiteId::new(2916284);

    #[test]
    fn delete_single_id_is_normalized_to_list() {
        let event = MediaEvent::delete(SITE, MediaId::new(42));

        assert_eq!(
            event,
            MediaEvent::Deleted {
                site_id: SITE,
                media_ids: vec![MediaId::new(42)],
            }
        );
    }

    #[test]
    fn delete_list_and_single_are_equivalent() {
        assert_eq!(
            MediaEvent::delete(SITE, vec![MediaId::new(42)]),
            MediaEvent::delete(SITE, MediaId::new(42)),
        );
        assert_eq!(
            MediaEvent::delete(SITE, [MediaId::new(42)]),
            MediaEvent::delete(SITE, MediaId::new(42)),
        );
    }

    #[test]
    fn delete_serializes_to_wire_shape() {
        let event = MediaEvent::delete(SITE, MediaId::new(42));

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "type": "MEDIA_DELETE", "siteId": 2916284, "mediaIds": [42] })
        );
    }

    #[test]
    fn receive_parses_from_wire_shape() {
        let event = MediaEvent::from_json_str(
            r#"{"type":"MEDIA_RECEIVE","siteId":2916284,"media":[{"ID":42,"title":"flowers"}]}"#,
        )
        .unwrap();

        assert_eq!(event.site_id(), SITE);
        assert_eq!(event.kind(), "MEDIA_RECEIVE");
        let MediaEvent::Received { media, .. } = event else {
            panic!("expected MEDIA_RECEIVE");
        };
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].id(), MediaId::new(42));
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let err = MediaEvent::from_json_str(r#"{"type":"MEDIA_UPDATE","siteId":1}"#).unwrap_err();
        assert!(matches!(err, MediaError::InvalidEvent(_)));
    }

    #[test]
    fn record_without_id_rejects_whole_event() {
        let result = MediaEvent::from_json_str(
            r#"{"type":"MEDIA_RECEIVE","siteId":1,"media":[{"title":"no id"}]}"#,
        );
        assert!(result.is_err());
    }
}
