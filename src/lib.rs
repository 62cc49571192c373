//! # snoo-rs
//!
//! A client-side object model for Reddit-style link-aggregation APIs.
//!
//! The service exposes everything as heterogeneous `{kind, data}` JSON
//! envelopes; this library turns those into typed entities and reassembles
//! paginated, tree-shaped discussion threads that the API only hands out as
//! flat pages mixed with "more comments" continuation stubs.
//!
//! ## Design Philosophy
//!
//! - **Object Model**: a closed, kind-tagged dispatcher materializes one
//!   concrete entity per envelope; unknown kinds are skippable, not fatal
//! - **I/O Separation**: network fetches go through the [`WebAgent`] trait;
//!   bring your own HTTP client, or enable the `reqwest-agent` feature
//! - **Explicit Context**: entities never hold hidden back-pointers; lazy
//!   lookups (author, subreddit) take a [`Session`] as an explicit parameter
//!
//! ## Examples
//!
//! ### Dispatching an envelope
//!
//! ```rust
//! use snoo_rs::Thing;
//!
//! let envelope = serde_json::json!({
//!     "kind": "t1",
//!     "data": { "name": "t1_abc", "id": "abc", "author": "someone",
//!               "body": "hello", "parent_id": "t3_xyz" }
//! });
//! let thing = Thing::parse(&envelope).unwrap();
//! assert!(matches!(thing, Some(Thing::Comment(_))));
//! ```
//!
//! ### Walking a full comment tree
//!
//! ```rust,no_run
//! # #[cfg(feature = "reqwest-agent")]
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use snoo_rs::{HttpAgent, Session};
//!
//! let session = Session::new(HttpAgent::new("snoo-rs demo")?);
//! let mut stream = session.comment_stream("abc123");
//! while let Some(comment) = stream.next().await {
//!     println!("{}", comment?.body);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod agent;
pub mod envelope;
pub mod error;
pub mod listing;
pub mod session;
pub mod things;

// Scripted agent for testing
pub mod mock;

pub use agent::WebAgent;
pub use error::{Error, Result};
pub use listing::CommentStream;
pub use session::{Session, SessionConfig};
pub use things::{Thing, ThingHint, ThingKind, ThingMeta};

// Optional reqwest-backed agent
#[cfg(feature = "reqwest-agent")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest-agent")))]
pub mod http;

#[cfg(feature = "reqwest-agent")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest-agent")))]
pub use http::HttpAgent;
