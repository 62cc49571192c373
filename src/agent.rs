//! The transport collaborator abstraction.
//!
//! All network I/O goes through the [`WebAgent`] trait: the object model
//! asks for a URL, the agent returns the raw JSON the service answered
//! with. Connection management, authentication, rate limiting, retries,
//! and timeouts are entirely the agent's business; the core never
//! retries, caches, or masks a transport failure.
//!
//! Enable the `reqwest-agent` feature for a ready-made implementation
//! ([`HttpAgent`](crate::HttpAgent)), or bring your own; tests use the
//! scripted [`MockAgent`](crate::mock::MockAgent).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Performs a network fetch and returns the raw JSON payload.
///
/// Implementations must be usable behind shared references, since a single
/// agent may serve several concurrent [`Session`](crate::Session) consumers.
#[async_trait]
pub trait WebAgent: Send + Sync {
    /// Fetch the given absolute URL and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// [`Error::Http`](crate::Error::Http) for non-success status codes,
    /// [`Error::Transport`](crate::Error::Transport) for anything else that
    /// kept a response from arriving.
    async fn fetch(&self, url: &str) -> Result<Value>;
}
