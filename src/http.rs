//! Reqwest-backed [`WebAgent`] implementation.
//!
//! Enabled by the `reqwest-agent` feature. The agent is a thin wrapper:
//! it issues GETs, maps non-success statuses to
//! [`Error::Http`](crate::Error::Http), and decodes the body as JSON.
//! Cheap to clone, since the inner [`reqwest::Client`] is `Arc`-based.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::agent::WebAgent;
use crate::error::{Error, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`WebAgent`] backed by [`reqwest::Client`].
///
/// # Example
///
/// ```rust,no_run
/// use snoo_rs::{HttpAgent, Session};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let agent = HttpAgent::new("my-app/0.1 (contact: you@example.com)")?;
/// let session = Session::new(agent);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpAgent {
    client: reqwest::Client,
}

impl HttpAgent {
    /// Create an agent with the given user-agent string and a default
    /// 30-second request timeout.
    ///
    /// Public APIs of this shape throttle or reject anonymous user agents,
    /// so pass something that identifies your application.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an already-configured [`reqwest::Client`].
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebAgent for HttpAgent {
    async fn fetch(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unrecognized status")
                    .to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Decoding(format!("response body is not JSON: {e}")))
    }
}
