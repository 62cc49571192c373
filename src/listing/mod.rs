//! Comment-thread listing assembly.
//!
//! A comment page from the service is not the whole thread: truncated
//! branches are replaced by continuation stubs that name the children still
//! unfetched. This module offers the two ways of consuming a thread:
//!
//! - [`Session::comments`]: one page, eagerly decoded, stubs discarded.
//!   Cheap, bounded, incomplete.
//! - [`Session::comment_stream`] / [`CommentStream`]: a lazy walk that
//!   yields the page's comments and then resolves root-anchored stubs one
//!   batch request at a time until the thread is exhausted.

mod stream;

pub use stream::CommentStream;

use crate::agent::WebAgent;
use crate::error::Result;
use crate::session::Session;
use crate::things::{Comment, Thing};

pub(crate) fn comments_path(post_id: &str, limit: Option<u32>) -> String {
    match limit {
        Some(limit) => format!("/comments/{post_id}.json?limit={limit}"),
        None => format!("/comments/{post_id}.json"),
    }
}

impl<A: WebAgent> Session<A> {
    /// Fetch one page of a post's top-level comments.
    ///
    /// This is the eager, single-request view: whatever the page carries is
    /// decoded (nested replies included) and any continuation stubs are
    /// discarded. The result is complete only for small threads; use
    /// [`Session::comment_stream`] to resolve the stubs.
    pub async fn comments(&self, post_id: &str, limit: Option<u32>) -> Result<Vec<Comment>> {
        let json = self.fetch(&comments_path(post_id, limit)).await?;
        let mut comments = Vec::new();
        for child in crate::envelope::comment_page_children(&json)? {
            if let Some(Thing::Comment(comment)) = Thing::parse(child)? {
                comments.push(comment);
            }
        }
        Ok(comments)
    }

    /// Lazily walk a post's full comment tree.
    ///
    /// No request is issued until the first
    /// [`next`](CommentStream::next) call.
    pub fn comment_stream(&self, post_id: &str) -> CommentStream<'_, A> {
        CommentStream::new(self, post_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAgent;
    use serde_json::json;

    #[test]
    fn test_comments_path() {
        assert_eq!(comments_path("abc", None), "/comments/abc.json");
        assert_eq!(comments_path("abc", Some(50)), "/comments/abc.json?limit=50");
    }

    #[tokio::test]
    async fn test_eager_page_discards_stubs() {
        let page = json!([
            {"kind": "Listing", "data": {"children": [
                {"kind": "t3", "data": {"name": "t3_post", "id": "post"}}
            ]}},
            {"kind": "Listing", "data": {"children": [
                {"kind": "t1", "data": {"name": "t1_a", "id": "a", "parent_id": "t3_post",
                                         "body": "first"}},
                {"kind": "more", "data": {"parent_id": "t3_post", "children": ["bb", "cc"]}}
            ]}}
        ]);
        let agent = MockAgent::new(vec![("/comments/post.json", page)]);
        let session = Session::new(agent);
        let comments = session.comments("post", None).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "first");
        assert!(session.agent().is_complete());
    }

    #[tokio::test]
    async fn test_eager_page_passes_limit() {
        let page = json!([
            {"kind": "Listing", "data": {"children": []}},
            {"kind": "Listing", "data": {"children": []}}
        ]);
        let agent = MockAgent::new(vec![("/comments/post.json?limit=25", page)]);
        let session = Session::new(agent);
        assert!(session.comments("post", Some(25)).await.unwrap().is_empty());
        assert!(session.agent().is_complete());
    }
}
