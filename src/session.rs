//! The session context: endpoint construction and entity-producing calls.
//!
//! The original object model gave every entity a hidden back-pointer to the
//! session it came from; here the relationship is inverted. Entities are
//! plain data, and anything that needs the network (resolving an author,
//! refreshing a post, walking a comment tree) takes a [`Session`] as an
//! explicit parameter.
//!
//! A session owns a [`WebAgent`] and a [`SessionConfig`]; it builds the
//! endpoint URLs and unwraps the service's envelope shapes, leaving the
//! agent with nothing but "fetch this URL".

use serde_json::Value;
use tracing::debug;

use crate::agent::WebAgent;
use crate::envelope;
use crate::error::{Error, Result};
use crate::things::{Post, Subreddit, Thing, User};

/// Connection settings for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the service, without a trailing slash
    pub base_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
        }
    }
}

/// The explicit context every lazy lookup goes through.
///
/// Generic over the agent so the same session code runs against a real
/// HTTP client or the scripted [`MockAgent`](crate::mock::MockAgent).
pub struct Session<A: WebAgent> {
    agent: A,
    config: SessionConfig,
}

impl<A: WebAgent> Session<A> {
    /// Create a session with the default configuration.
    pub fn new(agent: A) -> Self {
        Self::with_config(agent, SessionConfig::default())
    }

    /// Create a session with an explicit configuration.
    pub fn with_config(agent: A, config: SessionConfig) -> Self {
        Self { agent, config }
    }

    /// The session's configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The underlying agent.
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Fetch a service-relative path through the agent.
    pub(crate) async fn fetch(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!(target: "snoo_rs::session", url = %url, "fetching");
        self.agent.fetch(&url).await
    }

    /// Fetch a user account by name.
    pub async fn user(&self, name: &str) -> Result<User> {
        let json = self.fetch(&format!("/user/{name}/about.json")).await?;
        match Thing::parse(&json)? {
            Some(Thing::User(user)) => Ok(user),
            _ => Err(Error::Decoding(format!(
                "expected a t2 envelope for user {name}"
            ))),
        }
    }

    /// Fetch a subreddit by name (without the `/r/` prefix).
    pub async fn subreddit(&self, name: &str) -> Result<Subreddit> {
        let json = self.fetch(&format!("/r/{name}/about.json")).await?;
        match Thing::parse(&json)? {
            Some(Thing::Subreddit(subreddit)) => Ok(subreddit),
            _ => Err(Error::Decoding(format!(
                "expected a t5 envelope for subreddit {name}"
            ))),
        }
    }

    /// Fetch a post by its short identifier.
    pub async fn post(&self, id: &str) -> Result<Post> {
        let json = self.fetch(&format!("/by_id/t3_{id}.json")).await?;
        let children = envelope::listing_children(&json)?;
        let first = children
            .first()
            .ok_or_else(|| Error::Decoding(format!("no such post: {id}")))?;
        match Thing::parse(first)? {
            Some(Thing::Post(post)) => Ok(post),
            _ => Err(Error::Decoding(format!(
                "expected a t3 envelope for post {id}"
            ))),
        }
    }

    /// Fetch a batch of entities by `full_name`.
    ///
    /// Issues a single request; envelopes of unknown kind are skipped, not
    /// fatal, so the result may be shorter than the request.
    pub async fn things_by_id(&self, full_names: &[String]) -> Result<Vec<Thing>> {
        if full_names.is_empty() {
            return Ok(Vec::new());
        }
        let json = self
            .fetch(&format!("/api/info.json?id={}", full_names.join(",")))
            .await?;
        let mut things = Vec::new();
        for child in envelope::listing_children(&json)? {
            if let Some(thing) = Thing::parse(child)? {
                things.push(thing);
            }
        }
        Ok(things)
    }

    /// Re-materialize a post's non-identity fields in place.
    ///
    /// Identity (`full_name`, `id`) and the original `fetched_at` stamp are
    /// preserved; everything else is overwritten from a fresh fetch.
    pub async fn update_post(&self, post: &mut Post) -> Result<()> {
        let fresh = self.post(&post.meta.id).await?;
        let meta = post.meta.clone();
        *post = fresh;
        post.meta = meta;
        Ok(())
    }
}
