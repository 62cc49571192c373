//! Typed entities ("things") and the kind-tagged dispatcher.
//!
//! Every object the service returns is a *thing*: an envelope with a short
//! `kind` discriminator and a `data` payload. This module holds the closed
//! table mapping discriminators to concrete entity types, the shared
//! lifecycle metadata every entity carries, and the [`Thing`] sum type the
//! dispatcher produces.
//!
//! # Overview
//!
//! - [`ThingKind`]: the closed discriminator table (`t1`..`t5`, `more`)
//! - [`ThingMeta`]: identity and fetch-time metadata shared by entities
//! - [`Thing`]: one dispatched entity, as a tagged variant
//! - [`ThingHint`]: fallback variant hint for payloads without a usable kind
//!
//! # Example
//!
//! ```rust
//! use snoo_rs::{Thing, ThingKind};
//!
//! assert_eq!(ThingKind::from_tag("t3"), Some(ThingKind::Link));
//! assert_eq!(ThingKind::from_tag("t9"), None);
//!
//! let envelope = serde_json::json!({
//!     "kind": "t3",
//!     "data": { "name": "t3_abc", "id": "abc", "title": "hello" }
//! });
//! match Thing::parse(&envelope).unwrap() {
//!     Some(Thing::Post(post)) => assert_eq!(post.title, "hello"),
//!     other => panic!("expected a post, got {other:?}"),
//! }
//! ```

mod comment;
mod message;
mod more;
mod post;
mod subreddit;
mod user;
mod wiki;

pub use comment::Comment;
pub use message::Message;
pub use more::More;
pub use post::Post;
pub use subreddit::Subreddit;
pub use user::User;
pub use wiki::WikiRevision;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::envelope::{self, timestamps};
use crate::error::Result;

/// The closed discriminator table.
///
/// Unknown tags dispatch to "no result", never to an error, so feeds
/// containing kinds this library does not model can still be walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThingKind {
    /// `t1`: a comment
    Comment,
    /// `t2`: a user account
    Account,
    /// `t3`: a submitted post (link or self-post)
    Link,
    /// `t4`: a private message
    Message,
    /// `t5`: a subreddit
    Subreddit,
    /// `more`: a continuation stub for unfetched children
    More,
}

impl ThingKind {
    /// Look up a discriminator tag in the closed table.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "t1" => Some(ThingKind::Comment),
            "t2" => Some(ThingKind::Account),
            "t3" => Some(ThingKind::Link),
            "t4" => Some(ThingKind::Message),
            "t5" => Some(ThingKind::Subreddit),
            "more" => Some(ThingKind::More),
            _ => None,
        }
    }

    /// The wire tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            ThingKind::Comment => "t1",
            ThingKind::Account => "t2",
            ThingKind::Link => "t3",
            ThingKind::Message => "t4",
            ThingKind::Subreddit => "t5",
            ThingKind::More => "more",
        }
    }
}

/// Identity and lifecycle metadata shared by every content entity.
///
/// `full_name` is the kind-prefixed, globally unique identifier
/// (e.g. `t1_abc123`) and is the sole identity key: entity equality compares
/// `full_name` within a variant and nothing else. `fetched_at` is stamped
/// once at materialization and never recomputed by mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct ThingMeta {
    /// Opaque short identifier (the part after the kind prefix)
    pub id: String,
    /// Kind-prefixed globally unique identifier, e.g. `t1_abc123`
    #[serde(rename = "name")]
    pub full_name: String,
    /// Discriminator string copied verbatim from the envelope
    #[serde(skip)]
    pub kind: String,
    /// When this entity was materialized from the service
    #[serde(skip, default = "timestamps::now")]
    pub fetched_at: DateTime<Utc>,
}

impl ThingMeta {
    /// Time elapsed since this entity was fetched.
    pub fn time_since_fetch(&self) -> Duration {
        Utc::now() - self.fetched_at
    }

    /// Short permalink for this entity.
    pub fn shortlink(&self) -> String {
        format!("https://redd.it/{}", self.id)
    }
}

// Placeholder used only while serde skips the field; from_envelope always
// overwrites it before an entity escapes this module.
impl Default for ThingMeta {
    fn default() -> Self {
        Self {
            id: String::new(),
            full_name: String::new(),
            kind: String::new(),
            fetched_at: timestamps::now(),
        }
    }
}

/// Score and vote-direction fields shared by votable entities.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Votable {
    /// Net score
    #[serde(default)]
    pub score: i64,
    /// Upvote count
    #[serde(rename = "ups", default)]
    pub upvotes: i64,
    /// Downvote count
    #[serde(rename = "downs", default)]
    pub downvotes: i64,
    /// The authenticated user's vote: up (`true`), down (`false`), or none
    #[serde(rename = "likes", default)]
    pub liked: Option<bool>,
}

/// Fallback variant hint for [`Thing::parse_with_hint`].
///
/// Some payloads carry no usable `kind` (a wiki revision has none at all),
/// so callers that know what they asked for can name the expected variant
/// and have it constructed directly from the payload when the primary
/// dispatch comes up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThingHint {
    /// Expect a [`Comment`]
    Comment,
    /// Expect a [`User`]
    User,
    /// Expect a [`Post`]
    Post,
    /// Expect a [`Message`]
    Message,
    /// Expect a [`Subreddit`]
    Subreddit,
    /// Expect a [`More`] continuation stub
    More,
    /// Expect a [`WikiRevision`]
    WikiRevision,
}

/// One dispatched entity.
///
/// Produced exclusively by [`Thing::parse`] / [`Thing::parse_with_hint`];
/// the variant is determined by the envelope's `kind` discriminator.
/// Variants of different kinds never compare equal, even when their short
/// identifiers coincide.
#[derive(Debug, Clone, PartialEq)]
pub enum Thing {
    /// A comment (`t1`)
    Comment(Comment),
    /// A user account (`t2`)
    User(User),
    /// A post (`t3`)
    Post(Post),
    /// A private message (`t4`)
    Message(Message),
    /// A subreddit (`t5`)
    Subreddit(Subreddit),
    /// A continuation stub (`more`)
    More(More),
    /// A wiki page revision (no wire discriminator)
    WikiRevision(WikiRevision),
}

impl Thing {
    /// Dispatch an envelope through the closed kind table.
    ///
    /// Returns `Ok(None)` when the `kind` is absent or not in the table.
    /// Returns [`Error::Decoding`](crate::Error::Decoding) when the kind is
    /// known but the payload is malformed (missing `data`, missing identity
    /// fields).
    pub fn parse(json: &Value) -> Result<Option<Thing>> {
        let Some(tag) = envelope::kind_of(json) else {
            return Ok(None);
        };
        let Some(kind) = ThingKind::from_tag(tag) else {
            return Ok(None);
        };
        Ok(Some(match kind {
            ThingKind::Comment => Thing::Comment(Comment::from_envelope(json)?),
            ThingKind::Account => Thing::User(User::from_envelope(json)?),
            ThingKind::Link => Thing::Post(Post::from_envelope(json)?),
            ThingKind::Message => Thing::Message(Message::from_envelope(json)?),
            ThingKind::Subreddit => Thing::Subreddit(Subreddit::from_envelope(json)?),
            ThingKind::More => Thing::More(More::from_envelope(json)?),
        }))
    }

    /// Dispatch an envelope, falling back to a hinted variant.
    ///
    /// The primary kind table is consulted first; only when it yields no
    /// result is the hinted variant constructed directly from the payload.
    pub fn parse_with_hint(json: &Value, hint: ThingHint) -> Result<Option<Thing>> {
        if let Some(thing) = Thing::parse(json)? {
            return Ok(Some(thing));
        }
        Ok(Some(match hint {
            ThingHint::Comment => Thing::Comment(Comment::from_envelope(json)?),
            ThingHint::User => Thing::User(User::from_envelope(json)?),
            ThingHint::Post => Thing::Post(Post::from_envelope(json)?),
            ThingHint::Message => Thing::Message(Message::from_envelope(json)?),
            ThingHint::Subreddit => Thing::Subreddit(Subreddit::from_envelope(json)?),
            ThingHint::More => Thing::More(More::from_envelope(json)?),
            ThingHint::WikiRevision => Thing::WikiRevision(WikiRevision::from_envelope(json)?),
        }))
    }

    /// The entity's `full_name`, when the variant carries one.
    ///
    /// Continuation stubs and wiki revisions have no kind-prefixed name.
    pub fn full_name(&self) -> Option<&str> {
        match self {
            Thing::Comment(c) => Some(&c.meta.full_name),
            Thing::User(u) => Some(&u.meta.full_name),
            Thing::Post(p) => Some(&p.meta.full_name),
            Thing::Message(m) => Some(&m.meta.full_name),
            Thing::Subreddit(s) => Some(&s.meta.full_name),
            Thing::More(_) | Thing::WikiRevision(_) => None,
        }
    }
}

/// Decode an entity's metadata and stamp the discriminator.
pub(crate) fn meta_from_envelope(json: &Value, default_kind: ThingKind) -> Result<ThingMeta> {
    let data = envelope::data_of(json)?;
    let mut meta: ThingMeta = serde_json::from_value(data.clone())?;
    meta.kind = envelope::kind_of(json)
        .unwrap_or(default_kind.tag())
        .to_string();
    Ok(meta)
}
