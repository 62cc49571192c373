//! The comment entity (`t1`).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::agent::WebAgent;
use crate::envelope::{self, timestamps};
use crate::error::Result;
use crate::session::Session;
use crate::things::{meta_from_envelope, Thing, ThingKind, ThingMeta, User, Votable};

/// A comment in a discussion thread.
///
/// Comments own their replies in the downward direction only; the author,
/// subreddit, and root post are carried as names and resolved on demand
/// through an explicitly passed [`Session`].
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// Identity and fetch-time metadata
    #[serde(skip)]
    pub meta: ThingMeta,
    /// Score and vote fields
    #[serde(flatten)]
    pub votable: Votable,
    /// Author's username
    #[serde(default)]
    pub author: String,
    /// Comment body as markdown
    #[serde(default)]
    pub body: String,
    /// Comment body rendered as HTML, when the service provides it
    #[serde(default)]
    pub body_html: Option<String>,
    /// `full_name` of the immediate parent (a comment or the post itself)
    #[serde(default)]
    pub parent_id: String,
    /// Name of the subreddit the thread lives in
    #[serde(default)]
    pub subreddit: Option<String>,
    /// `full_name` of the root post (a back-reference, not a pointer)
    #[serde(default)]
    pub link_id: Option<String>,
    /// Creation time
    #[serde(default, deserialize_with = "timestamps::opt_epoch_seconds")]
    pub created_utc: Option<DateTime<Utc>>,
    /// Last edit time; `None` when the comment was never edited
    #[serde(default, deserialize_with = "timestamps::opt_edited")]
    pub edited: Option<DateTime<Utc>>,
    // Owned reply set, mutated only through absorb_replies
    #[serde(skip)]
    replies: Vec<Comment>,
}

impl Comment {
    pub(crate) fn from_envelope(json: &Value) -> Result<Self> {
        let data = envelope::data_of(json)?;
        let mut comment: Comment = serde_json::from_value(data.clone())?;
        comment.meta = meta_from_envelope(json, ThingKind::Comment)?;
        comment.replies = parse_reply_listing(data.get("replies"))?;
        Ok(comment)
    }

    /// Replies already known for this comment, in discovery order.
    pub fn replies(&self) -> &[Comment] {
        &self.replies
    }

    /// Fold additional replies into this comment's owned reply set.
    ///
    /// Replies whose `full_name` is already present are skipped, so
    /// absorbing the same batch twice is a no-op. Not safe to call from two
    /// expansion walks over the same comment; each walk owns the comments it
    /// is assembling.
    pub fn absorb_replies<I>(&mut self, new_replies: I)
    where
        I: IntoIterator<Item = Comment>,
    {
        for reply in new_replies {
            if self
                .replies
                .iter()
                .any(|known| known.meta.full_name == reply.meta.full_name)
            {
                continue;
            }
            self.replies.push(reply);
        }
    }

    /// Look up this comment's author through the session.
    pub async fn resolve_author<A: WebAgent>(&self, session: &Session<A>) -> Result<User> {
        session.user(&self.author).await
    }
}

// Identity is the full_name; body edits and differing fetch times do not
// make two materializations of the same comment unequal.
impl PartialEq for Comment {
    fn eq(&self, other: &Self) -> bool {
        self.meta.full_name == other.meta.full_name
    }
}

impl Eq for Comment {}

/// Parse the nested `replies` listing carried inline on a comment payload.
///
/// The service sends `""` instead of an object when a comment has no
/// replies. Stubs nested inside a reply listing are dropped; the lazy walk
/// only chases stubs anchored at the thread root.
fn parse_reply_listing(replies: Option<&Value>) -> Result<Vec<Comment>> {
    let Some(replies) = replies else {
        return Ok(Vec::new());
    };
    if !replies.is_object() {
        return Ok(Vec::new());
    }
    let mut parsed = Vec::new();
    for child in envelope::listing_children(replies)? {
        if let Some(Thing::Comment(reply)) = Thing::parse(child)? {
            parsed.push(reply);
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(name: &str, body: &str) -> Value {
        json!({
            "kind": "t1",
            "data": {
                "name": name,
                "id": name.trim_start_matches("t1_"),
                "author": "alice",
                "body": body,
                "parent_id": "t3_post",
                "link_id": "t3_post",
                "score": 5,
                "ups": 6,
                "downs": 1
            }
        })
    }

    fn comment(name: &str) -> Comment {
        Comment::from_envelope(&envelope(name, "hello")).unwrap()
    }

    #[test]
    fn test_from_envelope_fields() {
        let c = comment("t1_abc");
        assert_eq!(c.meta.full_name, "t1_abc");
        assert_eq!(c.author, "alice");
        assert_eq!(c.body, "hello");
        assert_eq!(c.parent_id, "t3_post");
        assert_eq!(c.link_id.as_deref(), Some("t3_post"));
        assert_eq!(c.votable.score, 5);
        assert_eq!(c.votable.upvotes, 6);
        assert!(c.replies().is_empty());
    }

    #[test]
    fn test_nested_replies_parsed() {
        let mut outer = envelope("t1_outer", "outer");
        outer["data"]["replies"] = json!({
            "kind": "Listing",
            "data": {"children": [
                {"kind": "t1", "data": {"name": "t1_inner", "id": "inner",
                                         "parent_id": "t1_outer", "body": "inner"}},
                {"kind": "more", "data": {"parent_id": "t1_outer", "children": ["zz"]}}
            ]}
        });
        let c = Comment::from_envelope(&outer).unwrap();
        // One real reply; the nested stub is not a content entity
        assert_eq!(c.replies().len(), 1);
        assert_eq!(c.replies()[0].meta.full_name, "t1_inner");
    }

    #[test]
    fn test_empty_string_replies() {
        let mut outer = envelope("t1_outer", "outer");
        outer["data"]["replies"] = json!("");
        let c = Comment::from_envelope(&outer).unwrap();
        assert!(c.replies().is_empty());
    }

    #[test]
    fn test_absorb_replies_appends_in_order() {
        let mut parent = comment("t1_parent");
        parent.absorb_replies(vec![comment("t1_r1"), comment("t1_r2")]);
        let names: Vec<&str> = parent
            .replies()
            .iter()
            .map(|r| r.meta.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["t1_r1", "t1_r2"]);
    }

    #[test]
    fn test_absorb_replies_is_idempotent() {
        let mut parent = comment("t1_parent");
        parent.absorb_replies(vec![comment("t1_r1")]);
        parent.absorb_replies(vec![comment("t1_r1"), comment("t1_r2")]);
        parent.absorb_replies(vec![comment("t1_r2")]);
        assert_eq!(parent.replies().len(), 2);
    }

    #[test]
    fn test_equality_ignores_body_and_fetch_time() {
        let a = Comment::from_envelope(&envelope("t1_abc", "one")).unwrap();
        let b = Comment::from_envelope(&envelope("t1_abc", "two")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, comment("t1_xyz"));
    }

    #[test]
    fn test_edited_false_means_never() {
        let mut e = envelope("t1_abc", "x");
        e["data"]["edited"] = json!(false);
        assert!(Comment::from_envelope(&e).unwrap().edited.is_none());

        e["data"]["edited"] = json!(1700000000.0);
        assert_eq!(
            Comment::from_envelope(&e).unwrap().edited.unwrap().timestamp(),
            1_700_000_000
        );
    }
}
