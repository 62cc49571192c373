//! Wire-shape helpers for the `{kind, data}` envelope format.
//!
//! Everything the service returns is wrapped: single entities come as
//! `{"kind": "t1", "data": {...}}`, pages come as `Listing` envelopes whose
//! `data.children` is an array of entity envelopes, and comment pages are a
//! two-element array where the *last* element is the comment listing. The
//! continuation endpoint wraps its results a third way, under
//! `json.data.things`. This module centralizes all of that unwrapping so the
//! dispatcher and assembler only ever see arrays of entity envelopes.

use serde_json::Value;

use crate::error::{Error, Result};

/// Extract the `kind` discriminator from an envelope, if present.
pub fn kind_of(json: &Value) -> Option<&str> {
    json.get("kind").and_then(Value::as_str)
}

/// Extract the payload object an entity is decoded from.
///
/// Follows the original wire convention: a value that already carries a
/// top-level `name` *is* the payload (a bare data object); otherwise the
/// payload must live under `data`.
pub fn data_of(json: &Value) -> Result<&Value> {
    if json.get("name").is_some() {
        return Ok(json);
    }
    json.get("data")
        .filter(|d| d.is_object())
        .ok_or_else(|| Error::Decoding("envelope has no `data` object".to_string()))
}

/// Extract the children array of a `Listing` envelope.
pub fn listing_children(json: &Value) -> Result<&Vec<Value>> {
    json.get("data")
        .and_then(|d| d.get("children"))
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Decoding("listing has no `data.children` array".to_string()))
}

/// Extract the comment envelopes from a comment-page response.
///
/// A comment page is a two-element array: the first element lists the post
/// itself, the last element's `data.children` holds the comments.
pub fn comment_page_children(json: &Value) -> Result<&Vec<Value>> {
    let last = json
        .as_array()
        .and_then(|page| page.last())
        .ok_or_else(|| Error::Decoding("comment page is not a non-empty array".to_string()))?;
    listing_children(last)
}

/// Extract the entity envelopes from a continuation-batch response.
///
/// The batch endpoint nests its results under `json.data.things`.
pub fn batch_things(json: &Value) -> Result<&Vec<Value>> {
    json.get("json")
        .and_then(|j| j.get("data"))
        .and_then(|d| d.get("things"))
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Decoding("batch response has no `json.data.things` array".to_string()))
}

/// Serde helpers for the service's timestamp quirks.
///
/// Timestamps are Unix epoch seconds, possibly fractional. The `edited`
/// field is `false` (or `0`) when an item has never been edited; that is
/// "absent", not the epoch start.
pub mod timestamps {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn from_epoch(secs: f64) -> Option<DateTime<Utc>> {
        let millis = (secs * 1000.0) as i64;
        Utc.timestamp_millis_opt(millis).single()
    }

    /// Deserialize epoch seconds into an optional absolute timestamp.
    ///
    /// Missing or unparseable values become `None` rather than failing the
    /// whole entity; creation times are metadata, not identity.
    pub fn opt_epoch_seconds<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(Value::as_f64).and_then(from_epoch))
    }

    /// Deserialize the `edited` field: `false`/`0` means "never edited".
    pub fn opt_edited<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_f64().filter(|secs| *secs > 0.0).and_then(from_epoch),
            _ => None,
        })
    }

    /// Default for `fetched_at` fields skipped during deserialization.
    pub fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_kind_of() {
        assert_eq!(kind_of(&json!({"kind": "t1", "data": {}})), Some("t1"));
        assert_eq!(kind_of(&json!({"data": {}})), None);
        assert_eq!(kind_of(&json!({"kind": 3})), None);
    }

    #[test]
    fn test_data_of_envelope() {
        let envelope = json!({"kind": "t1", "data": {"id": "abc"}});
        assert_eq!(data_of(&envelope).unwrap(), &json!({"id": "abc"}));
    }

    #[test]
    fn test_data_of_bare_payload() {
        // A payload carrying `name` at the top level is used as-is
        let bare = json!({"name": "t1_abc", "id": "abc"});
        assert_eq!(data_of(&bare).unwrap(), &bare);
    }

    #[test]
    fn test_data_of_missing() {
        assert!(data_of(&json!({"kind": "t1"})).is_err());
        assert!(data_of(&json!({"kind": "t1", "data": "nope"})).is_err());
    }

    #[test]
    fn test_listing_children() {
        let listing = json!({"kind": "Listing", "data": {"children": [{"kind": "t1"}]}});
        assert_eq!(listing_children(&listing).unwrap().len(), 1);
        assert!(listing_children(&json!({"kind": "Listing", "data": {}})).is_err());
    }

    #[test]
    fn test_comment_page_children() {
        let page = json!([
            {"kind": "Listing", "data": {"children": [{"kind": "t3"}]}},
            {"kind": "Listing", "data": {"children": [{"kind": "t1"}, {"kind": "more"}]}}
        ]);
        assert_eq!(comment_page_children(&page).unwrap().len(), 2);
        assert!(comment_page_children(&json!([])).is_err());
        assert!(comment_page_children(&json!({"kind": "Listing"})).is_err());
    }

    #[test]
    fn test_batch_things() {
        let batch = json!({"json": {"data": {"things": [{"kind": "t1"}]}}});
        assert_eq!(batch_things(&batch).unwrap().len(), 1);
        assert!(batch_things(&json!({"json": {}})).is_err());
    }

    #[derive(Deserialize)]
    struct Stamps {
        #[serde(default, deserialize_with = "timestamps::opt_epoch_seconds")]
        created_utc: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "timestamps::opt_edited")]
        edited: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_epoch_seconds_fractional() {
        let stamps: Stamps =
            serde_json::from_value(json!({"created_utc": 1700000000.5, "edited": false})).unwrap();
        let created = stamps.created_utc.unwrap();
        assert_eq!(created.timestamp(), 1_700_000_000);
        assert_eq!(created.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_edited_false_is_never_edited() {
        let stamps: Stamps = serde_json::from_value(json!({"edited": false})).unwrap();
        assert!(stamps.edited.is_none());
    }

    #[test]
    fn test_edited_zero_is_never_edited() {
        let stamps: Stamps = serde_json::from_value(json!({"edited": 0})).unwrap();
        assert!(stamps.edited.is_none());
    }

    #[test]
    fn test_edited_timestamp() {
        let stamps: Stamps = serde_json::from_value(json!({"edited": 1700000000.0})).unwrap();
        assert_eq!(stamps.edited.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_missing_created_is_none() {
        let stamps: Stamps = serde_json::from_value(json!({})).unwrap();
        assert!(stamps.created_utc.is_none());
    }
}
