//! Scripted web agent for testing purposes.
//!
//! This module provides a mock [`WebAgent`] that serves canned JSON
//! payloads for an expected sequence of requests, so listing assembly and
//! entity materialization can be tested without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::agent::WebAgent;
use crate::error::{Error, Result};

/// A scripted agent that simulates service responses for testing.
///
/// The agent accepts a series of expected request/response pairs and
/// validates that requests arrive in order. A request matches when the
/// fetched URL *contains* the expected fragment, so scripts can name just
/// the interesting part of a path and ignore the base URL and query order.
pub struct MockAgent {
    expected_interactions: Mutex<VecDeque<(String, Value)>>,
    strict_mode: bool,
}

impl MockAgent {
    /// Create a new mock agent with a series of expected interactions.
    ///
    /// Each interaction pairs a URL fragment the next request must contain
    /// with the JSON payload to answer it with.
    pub fn new<I, S>(interactions: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Self {
            expected_interactions: Mutex::new(
                interactions
                    .into_iter()
                    .map(|(url, json)| (url.into(), json))
                    .collect(),
            ),
            strict_mode: true,
        }
    }

    /// Create a new mock agent in non-strict mode.
    ///
    /// In non-strict mode an unexpected request gets a 404 instead of a
    /// transport error, and the scripted interaction stays queued.
    pub fn new_relaxed<I, S>(interactions: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut agent = Self::new(interactions);
        agent.strict_mode = false;
        agent
    }

    /// Check if all expected interactions have been consumed.
    pub fn is_complete(&self) -> bool {
        self.remaining_interactions() == 0
    }

    /// Get the number of remaining expected interactions.
    pub fn remaining_interactions(&self) -> usize {
        self.expected_interactions
            .lock()
            .map(|queue| queue.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl WebAgent for MockAgent {
    async fn fetch(&self, url: &str) -> Result<Value> {
        let mut queue = self
            .expected_interactions
            .lock()
            .map_err(|_| Error::Transport("mock agent lock poisoned".to_string()))?;
        match queue.pop_front() {
            Some((expected, response)) if url.contains(&expected) => Ok(response),
            Some((expected, response)) => {
                if self.strict_mode {
                    Err(Error::Transport(format!(
                        "expected a request containing {expected:?}, got {url:?}"
                    )))
                } else {
                    queue.push_front((expected, response));
                    Err(Error::Http {
                        status: 404,
                        message: "no scripted response for this URL".to_string(),
                    })
                }
            }
            None => {
                if self.strict_mode {
                    Err(Error::Transport("no more expected requests".to_string()))
                } else {
                    Err(Error::Http {
                        status: 404,
                        message: "no scripted response for this URL".to_string(),
                    })
                }
            }
        }
    }
}
