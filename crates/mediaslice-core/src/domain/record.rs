//! Media record: one uploaded asset as the platform API delivers it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{MediaError, MediaId};

/// Attribute key holding the asset's source location.
pub const URL_ATTRIBUTE: &str = "URL";

/// One media asset.
///
/// - `ID` is the only required field.
/// - Every other attribute is kept verbatim and never interpreted by the store.
/// - Records are replaced as a whole on re-receipt, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    #[serde(rename = "ID")]
    id: MediaId,

    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl MediaRecord {
    pub fn new(id: MediaId) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter. Setting `"ID"` is ignored; the id is fixed.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != "ID" {
            self.attributes.insert(key, value.into());
        }
        self
    }

    /// Decode a record from an arbitrary JSON object.
    pub fn from_value(value: Value) -> Result<Self, MediaError> {
        serde_json::from_value(value).map_err(MediaError::InvalidRecord)
    }

    pub fn id(&self) -> MediaId {
        self.id
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Raw `URL` attribute, whatever JSON type it carries.
    pub fn url(&self) -> Option<&Value> {
        self.attribute(URL_ATTRIBUTE)
    }
}
