//! Selectors: the only reads other subsystems perform against media state.

use crate::domain::{MediaId, MediaRecord, SiteId};
use crate::sanitize::SafeImageUrl;
use crate::store::MediaState;

/// Media record by site and id, `None` if not known.
pub fn get_media_item(state: &MediaState, site_id: SiteId, media_id: MediaId) -> Option<&MediaRecord> {
    state.get(site_id, media_id)
}

/// Safe URL of a media record, `None` if the record is unknown or its URL
/// cannot be made safe.
pub fn get_media_url(
    state: &MediaState,
    filter: &SafeImageUrl,
    site_id: SiteId,
    media_id: MediaId,
) -> Option<String> {
    let media = get_media_item(state, site_id, media_id)?;
    filter.sanitize_value(media.url()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::SanitizerConfig;

    const SITE: SiteId = SiteId::new(2916284);

    fn state(raw: &str) -> MediaState {
        MediaState::from_json_str(raw).unwrap()
    }

    fn filter() -> SafeImageUrl {
        SafeImageUrl::from_config(&SanitizerConfig::default()).unwrap()
    }

    #[test]
    fn item_is_none_when_site_not_in_state() {
        let state = state("{}");
        assert!(get_media_item(&state, SITE, MediaId::new(42)).is_none());
    }

    #[test]
    fn item_is_none_when_media_not_in_site() {
        let state = state(r#"{ "2916284": {} }"#);
        assert!(get_media_item(&state, SITE, MediaId::new(42)).is_none());
    }

    #[test]
    fn item_is_returned() {
        let state = state(r#"{ "2916284": { "42": { "ID": 42, "title": "flowers" } } }"#);

        let item = get_media_item(&state, SITE, MediaId::new(42)).unwrap();
        assert_eq!(
            serde_json::to_value(item).unwrap(),
            serde_json::json!({ "ID": 42, "title": "flowers" })
        );
    }

    #[test]
    fn url_is_none_when_item_not_in_state() {
        let state = state(r#"{ "2916284": {} }"#);
        assert_eq!(get_media_url(&state, &filter(), SITE, MediaId::new(42)), None);
    }

    #[test]
    fn url_is_none_when_item_has_no_url() {
        let state = state(r#"{ "2916284": { "42": { "ID": 42, "title": "flowers" } } }"#);
        assert_eq!(get_media_url(&state, &filter(), SITE, MediaId::new(42)), None);
    }

    #[test]
    fn url_is_none_when_url_is_not_a_string() {
        let state = state(r#"{ "2916284": { "42": { "ID": 42, "URL": 7 } } }"#);
        assert_eq!(get_media_url(&state, &filter(), SITE, MediaId::new(42)), None);
    }

    #[test]
    fn url_is_safe_variation() {
        let state = state(
            r#"{ "2916284": { "42": {
                "ID": 42,
                "title": "flowers",
                "URL": "https://example.files.wordpress.com/2014/06/flower.gif"
            } } }"#,
        );

        assert_eq!(
            get_media_url(&state, &filter(), SITE, MediaId::new(42)).as_deref(),
            Some("https://example.files.wordpress.com/2014/06/flower.gif")
        );
    }
}
