//! The wiki-page-revision entity.
//!
//! Revisions are the one payload the service ships with no `kind`
//! discriminator at all, so they are only reachable through
//! [`Thing::parse_with_hint`](crate::Thing::parse_with_hint).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::envelope::timestamps;
use crate::error::{Error, Result};

/// One revision of a wiki page.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiRevision {
    /// Revision identifier
    pub id: String,
    /// Wiki page the revision belongs to
    #[serde(default)]
    pub page: Option<String>,
    /// Edit reason supplied by the author
    #[serde(default)]
    pub reason: Option<String>,
    /// Username of the revision author
    #[serde(skip)]
    pub author: Option<String>,
    /// When the revision was made
    #[serde(default, deserialize_with = "timestamps::opt_epoch_seconds")]
    pub timestamp: Option<DateTime<Utc>>,
    /// When this revision was materialized from the service
    #[serde(skip, default = "timestamps::now")]
    pub fetched_at: DateTime<Utc>,
}

impl WikiRevision {
    pub(crate) fn from_envelope(json: &Value) -> Result<Self> {
        // No envelope: the revision payload is the object itself
        let mut revision: WikiRevision = serde_json::from_value(json.clone())
            .map_err(|e| Error::Decoding(format!("malformed wiki revision: {e}")))?;
        // The author arrives as a nested t2 envelope; only the name matters here
        revision.author = json
            .get("author")
            .and_then(|a| a.get("data"))
            .and_then(|d| d.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(revision)
    }
}

// Revisions have no kind-prefixed full_name; the revision id is the identity.
impl PartialEq for WikiRevision {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WikiRevision {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_envelope() {
        let payload = json!({
            "id": "rev-1",
            "page": "index",
            "reason": "fix typo",
            "timestamp": 1700000000.0,
            "author": {"kind": "t2", "data": {"name": "alice", "id": "u1"}}
        });
        let revision = WikiRevision::from_envelope(&payload).unwrap();
        assert_eq!(revision.id, "rev-1");
        assert_eq!(revision.page.as_deref(), Some("index"));
        assert_eq!(revision.author.as_deref(), Some("alice"));
        assert_eq!(revision.timestamp.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_missing_id_is_decoding_error() {
        assert!(WikiRevision::from_envelope(&json!({"page": "index"})).is_err());
    }
}
