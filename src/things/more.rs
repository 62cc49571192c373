//! The continuation stub ("more") entity.

use serde::Deserialize;
use serde_json::Value;

use crate::envelope;
use crate::error::{Error, Result};

/// A "more comments" continuation stub.
///
/// The service returns one of these *instead of* actual content when a
/// listing is truncated: it names the parent under which more children
/// exist and the ordered identifiers still to be fetched. It is not a
/// content entity, only a driver for the next fetch of a lazy expansion,
/// so it carries no [`ThingMeta`](crate::ThingMeta).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct More {
    /// `full_name` of the comment or post whose children are unfetched
    pub parent_id: String,
    /// Ordered short identifiers of the children still to be fetched
    pub children: Vec<String>,
    /// Service's hint of how many descendants the stub stands for
    #[serde(default)]
    pub count: Option<u64>,
}

impl More {
    pub(crate) fn from_envelope(json: &Value) -> Result<Self> {
        let data = envelope::data_of(json)?;
        let more: More = serde_json::from_value(data.clone())
            .map_err(|e| Error::Decoding(format!("malformed continuation stub: {e}")))?;
        Ok(more)
    }

    /// Whether the stub names anything left to fetch.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
