//! The subreddit entity (`t5`).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::envelope::{self, timestamps};
use crate::error::Result;
use crate::things::{meta_from_envelope, ThingKind, ThingMeta};

/// A subreddit (a community / topic board).
#[derive(Debug, Clone, Deserialize)]
pub struct Subreddit {
    /// Identity and fetch-time metadata
    #[serde(skip)]
    pub meta: ThingMeta,
    /// Short name as used in URLs, without the `/r/` prefix
    #[serde(default)]
    pub display_name: String,
    /// Human-readable title
    #[serde(default)]
    pub title: String,
    /// Public sidebar description
    #[serde(default)]
    pub public_description: String,
    /// Subscriber count, when visible
    #[serde(default)]
    pub subscribers: Option<u64>,
    /// Whether the whole subreddit is marked not-safe-for-work
    #[serde(rename = "over18", default)]
    pub nsfw: bool,
    /// Site-relative URL, e.g. `/r/rust/`
    #[serde(default)]
    pub url: Option<String>,
    /// Creation time
    #[serde(default, deserialize_with = "timestamps::opt_epoch_seconds")]
    pub created_utc: Option<DateTime<Utc>>,
}

impl Subreddit {
    pub(crate) fn from_envelope(json: &Value) -> Result<Self> {
        let data = envelope::data_of(json)?;
        let mut subreddit: Subreddit = serde_json::from_value(data.clone())?;
        subreddit.meta = meta_from_envelope(json, ThingKind::Subreddit)?;
        Ok(subreddit)
    }
}

impl PartialEq for Subreddit {
    fn eq(&self, other: &Self) -> bool {
        self.meta.full_name == other.meta.full_name
    }
}

impl Eq for Subreddit {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_envelope() {
        let envelope = json!({
            "kind": "t5",
            "data": {
                "name": "t5_s1",
                "id": "s1",
                "display_name": "rust",
                "title": "The Rust Programming Language",
                "public_description": "A place for all things Rust",
                "subscribers": 250000,
                "over18": false,
                "url": "/r/rust/"
            }
        });
        let subreddit = Subreddit::from_envelope(&envelope).unwrap();
        assert_eq!(subreddit.display_name, "rust");
        assert_eq!(subreddit.subscribers, Some(250000));
        assert_eq!(subreddit.url.as_deref(), Some("/r/rust/"));
        assert!(!subreddit.nsfw);
    }
}
