//! The user-account entity (`t2`).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::envelope::{self, timestamps};
use crate::error::Result;
use crate::things::{meta_from_envelope, ThingKind, ThingMeta};

/// A user account.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Identity and fetch-time metadata
    #[serde(skip)]
    pub meta: ThingMeta,
    /// Username
    #[serde(default)]
    pub name: String,
    /// Karma earned from posts
    #[serde(default)]
    pub link_karma: i64,
    /// Karma earned from comments
    #[serde(default)]
    pub comment_karma: i64,
    /// Whether the account has premium status
    #[serde(default)]
    pub is_gold: bool,
    /// Whether the account moderates any subreddit
    #[serde(default)]
    pub is_mod: bool,
    /// Account creation time
    #[serde(default, deserialize_with = "timestamps::opt_epoch_seconds")]
    pub created_utc: Option<DateTime<Utc>>,
}

impl User {
    pub(crate) fn from_envelope(json: &Value) -> Result<Self> {
        let data = envelope::data_of(json)?;
        let mut user: User = serde_json::from_value(data.clone())?;
        user.meta = meta_from_envelope(json, ThingKind::Account)?;
        Ok(user)
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.meta.full_name == other.meta.full_name
    }
}

impl Eq for User {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_envelope() {
        let envelope = json!({
            "kind": "t2",
            "data": {
                "name": "alice",
                "id": "u1",
                "link_karma": 1200,
                "comment_karma": 3400,
                "is_gold": true,
                "is_mod": false,
                "created_utc": 1500000000.0
            }
        });
        let user = User::from_envelope(&envelope).unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.meta.full_name, "alice");
        assert_eq!(user.link_karma, 1200);
        assert!(user.is_gold);
        assert_eq!(user.created_utc.unwrap().timestamp(), 1_500_000_000);
    }
}
