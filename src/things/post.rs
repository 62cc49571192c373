//! The post entity (`t3`).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::agent::WebAgent;
use crate::envelope::{self, timestamps};
use crate::error::Result;
use crate::listing::CommentStream;
use crate::session::Session;
use crate::things::{meta_from_envelope, Comment, Subreddit, ThingKind, ThingMeta, User, Votable};

/// A submitted post: an external link or a self-post.
///
/// A post owns no comments. One page of its thread comes from
/// [`Post::comments`]; the full tree, continuation stubs resolved, comes
/// from [`Post::comment_stream`]. Author and subreddit are names resolved
/// on demand through an explicitly passed [`Session`].
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    /// Identity and fetch-time metadata
    #[serde(skip)]
    pub meta: ThingMeta,
    /// Score and vote fields
    #[serde(flatten)]
    pub votable: Votable,
    /// Post title
    #[serde(default)]
    pub title: String,
    /// Author's username
    #[serde(default)]
    pub author: String,
    /// Target URL; for self-posts this points back at the post itself
    #[serde(default)]
    pub url: Option<String>,
    /// Self-post body as markdown
    #[serde(default)]
    pub selftext: String,
    /// Self-post body rendered as HTML, when the service provides it
    #[serde(default)]
    pub selftext_html: Option<String>,
    /// Name of the subreddit the post was submitted to
    #[serde(default)]
    pub subreddit: String,
    /// Domain the link points at
    #[serde(default)]
    pub domain: Option<String>,
    /// Site-relative permalink
    #[serde(default)]
    pub permalink: Option<String>,
    /// Whether this is a self-post
    #[serde(default)]
    pub is_self: bool,
    /// Whether the post is marked not-safe-for-work
    #[serde(rename = "over_18", default)]
    pub nsfw: bool,
    /// Link flair text, if flaired
    #[serde(default)]
    pub link_flair_text: Option<String>,
    /// Link flair CSS class, if flaired
    #[serde(default)]
    pub link_flair_css_class: Option<String>,
    /// Comment-count hint reported by the service
    #[serde(rename = "num_comments", default)]
    pub comment_count: u64,
    /// Creation time
    #[serde(default, deserialize_with = "timestamps::opt_epoch_seconds")]
    pub created_utc: Option<DateTime<Utc>>,
    /// Last edit time; `None` when the post was never edited
    #[serde(default, deserialize_with = "timestamps::opt_edited")]
    pub edited: Option<DateTime<Utc>>,
}

impl Post {
    pub(crate) fn from_envelope(json: &Value) -> Result<Self> {
        let data = envelope::data_of(json)?;
        let mut post: Post = serde_json::from_value(data.clone())?;
        post.meta = meta_from_envelope(json, ThingKind::Link)?;
        Ok(post)
    }

    /// Short permalink for this post.
    pub fn shortlink(&self) -> String {
        self.meta.shortlink()
    }

    /// Look up this post's author through the session.
    pub async fn resolve_author<A: WebAgent>(&self, session: &Session<A>) -> Result<User> {
        session.user(&self.author).await
    }

    /// Look up this post's subreddit through the session.
    pub async fn resolve_subreddit<A: WebAgent>(&self, session: &Session<A>) -> Result<Subreddit> {
        session.subreddit(&self.subreddit).await
    }

    /// Fetch one page of top-level comments, stubs discarded.
    pub async fn comments<A: WebAgent>(
        &self,
        session: &Session<A>,
        limit: Option<u32>,
    ) -> Result<Vec<Comment>> {
        session.comments(&self.meta.id, limit).await
    }

    /// Lazily walk the full comment tree, resolving continuation stubs.
    pub fn comment_stream<'a, A: WebAgent>(&self, session: &'a Session<A>) -> CommentStream<'a, A> {
        session.comment_stream(&self.meta.id)
    }

    /// Re-materialize this post's non-identity fields in place.
    ///
    /// `full_name`, `id`, and `fetched_at` are preserved.
    pub async fn update<A: WebAgent>(&mut self, session: &Session<A>) -> Result<()> {
        session.update_post(self).await
    }
}

// Identity is the full_name; score drift and differing fetch times do not
// make two materializations of the same post unequal.
impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.meta.full_name == other.meta.full_name
    }
}

impl Eq for Post {}
