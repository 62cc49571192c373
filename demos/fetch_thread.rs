//! Fetch a live post and walk its full comment tree.
//!
//! Run with:
//!   cargo run --example fetch_thread --features reqwest-agent -- <post-id>
//!
//! The post id is the short id from a post URL, e.g. for
//! https://www.reddit.com/r/rust/comments/abc123/... pass `abc123`.

use snoo_rs::{HttpAgent, Session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let post_id = std::env::args()
        .nth(1)
        .ok_or("usage: fetch_thread <post-id>")?;

    let agent = HttpAgent::new("snoo-rs/0.1 fetch_thread example")?;
    let session = Session::new(agent);

    let post = session.post(&post_id).await?;
    println!("{} ({})", post.title, post.shortlink());
    println!("by {} in r/{}, {} comments\n", post.author, post.subreddit, post.comment_count);

    let mut stream = post.comment_stream(&session);
    let mut yielded = 0usize;
    while let Some(comment) = stream.next().await {
        let comment = comment?;
        println!("[{:>4}] {}: {}", comment.votable.score, comment.author, comment.body);
        yielded += 1;
    }
    println!("\n{yielded} top-level comments");

    Ok(())
}
