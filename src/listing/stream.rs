//! Lazy, stub-resolving walk over a comment thread.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::agent::WebAgent;
use crate::envelope;
use crate::error::Result;
use crate::session::Session;
use crate::things::{Comment, More, Thing};

/// A lazy depth-first walk over a post's comment tree.
///
/// The walk starts from one comment page and resolves continuation stubs
/// anchored at the thread root, one batch request per stub, yielding each
/// top-level comment (replies nested) as it becomes available. Stubs whose
/// parent is not the thread root mark the natural end of the walk, not an
/// error.
///
/// Each requested child identifier is remembered for the lifetime of the
/// stream, so a service that keeps answering with stubs for identifiers it
/// already served cannot loop the walk forever.
///
/// The first transport or decoding error is yielded once and ends the
/// stream; partial results already yielded stay valid.
pub struct CommentStream<'a, A: WebAgent> {
    session: &'a Session<A>,
    post_id: String,
    link_full_name: String,
    ready: VecDeque<Comment>,
    pending: VecDeque<More>,
    requested: HashSet<String>,
    started: bool,
    finished: bool,
}

impl<'a, A: WebAgent> CommentStream<'a, A> {
    pub(crate) fn new(session: &'a Session<A>, post_id: &str) -> Self {
        Self {
            session,
            post_id: post_id.to_string(),
            link_full_name: format!("t3_{post_id}"),
            ready: VecDeque::new(),
            pending: VecDeque::new(),
            requested: HashSet::new(),
            started: false,
            finished: false,
        }
    }

    /// Yield the next top-level comment, fetching as needed.
    ///
    /// Returns `None` when the thread is exhausted or after an error has
    /// been yielded.
    pub async fn next(&mut self) -> Option<Result<Comment>> {
        loop {
            if self.finished {
                return None;
            }
            if let Some(comment) = self.ready.pop_front() {
                return Some(Ok(comment));
            }
            let step = if !self.started {
                self.started = true;
                self.fetch_first_page().await
            } else if let Some(stub) = self.pending.pop_front() {
                self.resolve_stub(stub).await
            } else {
                self.finished = true;
                continue;
            };
            if let Err(e) = step {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }

    /// Drain the walk into a vector.
    pub async fn collect_all(mut self) -> Result<Vec<Comment>> {
        let mut comments = Vec::new();
        while let Some(next) = self.next().await {
            comments.push(next?);
        }
        Ok(comments)
    }

    async fn fetch_first_page(&mut self) -> Result<()> {
        let path = super::comments_path(&self.post_id, None);
        let json = self.session.fetch(&path).await?;
        let children = envelope::comment_page_children(&json)?.clone();
        self.classify(&children)?;
        Ok(())
    }

    /// Resolve one continuation stub with a single batch request.
    async fn resolve_stub(&mut self, stub: More) -> Result<()> {
        debug!(
            target: "snoo_rs::listing",
            parent = %stub.parent_id,
            children = stub.children.len(),
            "resolving continuation stub"
        );
        let path = format!(
            "/api/morechildren.json?api_type=json&link_id={}&children={}",
            self.link_full_name,
            stub.children.join(",")
        );
        let json = self.session.fetch(&path).await?;
        let things = envelope::batch_things(&json)?.clone();

        // The batch comes back flat; rebuild the subtree before yielding.
        let mut flat = Vec::new();
        let mut stubs = Vec::new();
        for child in &things {
            match Thing::parse(child)? {
                Some(Thing::Comment(comment)) => flat.push(comment),
                Some(Thing::More(more)) => stubs.push(more),
                _ => {}
            }
        }
        for comment in assemble_forest(flat) {
            self.ready.push_back(comment);
        }
        for more in stubs {
            self.queue_stub(more);
        }
        Ok(())
    }

    fn classify(&mut self, children: &[serde_json::Value]) -> Result<()> {
        for child in children {
            match Thing::parse(child)? {
                Some(Thing::Comment(comment)) => self.ready.push_back(comment),
                Some(Thing::More(more)) => self.queue_stub(more),
                _ => {}
            }
        }
        Ok(())
    }

    /// Queue a stub for resolution, or drop it.
    ///
    /// A stub anchored anywhere but the thread root ends the walk's interest
    /// in it, and identifiers already requested once are never requested
    /// again.
    fn queue_stub(&mut self, more: More) {
        if more.parent_id != self.link_full_name {
            trace!(
                target: "snoo_rs::listing",
                parent = %more.parent_id,
                "dropping stub not anchored at the thread root"
            );
            return;
        }
        let fresh: Vec<String> = more
            .children
            .into_iter()
            .filter(|id| self.requested.insert(id.clone()))
            .collect();
        if fresh.is_empty() {
            trace!(target: "snoo_rs::listing", "dropping stub with nothing left to fetch");
            return;
        }
        self.pending.push_back(More {
            parent_id: more.parent_id,
            children: fresh,
            count: more.count,
        });
    }
}

/// Nest a flat batch of comments into a forest, preserving wire order.
///
/// A batch answers with parents and their descendants side by side; each
/// comment whose parent is also in the batch becomes that parent's reply,
/// everything else is a root. Comments are moved, never cloned.
fn assemble_forest(batch: Vec<Comment>) -> Vec<Comment> {
    let index: HashMap<String, usize> = batch
        .iter()
        .enumerate()
        .map(|(i, comment)| (comment.meta.full_name.clone(), i))
        .collect();

    let mut child_indices: Vec<Vec<usize>> = vec![Vec::new(); batch.len()];
    let mut roots = Vec::new();
    for (i, comment) in batch.iter().enumerate() {
        match index.get(&comment.parent_id) {
            Some(&parent) if parent != i => child_indices[parent].push(i),
            _ => roots.push(i),
        }
    }

    let mut slots: Vec<Option<Comment>> = batch.into_iter().map(Some).collect();
    let mut forest: Vec<Comment> = roots
        .into_iter()
        .filter_map(|root| attach_replies(root, &mut slots, &child_indices))
        .collect();
    // A malformed batch can carry a parent cycle, leaving members that are
    // nobody's root; surface them rather than losing them.
    for i in 0..slots.len() {
        if let Some(comment) = attach_replies(i, &mut slots, &child_indices) {
            forest.push(comment);
        }
    }
    forest
}

fn attach_replies(
    i: usize,
    slots: &mut [Option<Comment>],
    child_indices: &[Vec<usize>],
) -> Option<Comment> {
    let mut node = slots[i].take()?;
    let replies: Vec<Comment> = child_indices[i]
        .iter()
        .filter_map(|&child| attach_replies(child, slots, child_indices))
        .collect();
    node.absorb_replies(replies);
    Some(node)
}
