//! Walk a comment thread served by the scripted agent, no network needed.
//!
//! Run with: cargo run --example offline_walk

use serde_json::json;
use snoo_rs::mock::MockAgent;
use snoo_rs::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // One comment page with a truncated branch, plus the batch that
    // resolves it.
    let page = json!([
        {"kind": "Listing", "data": {"children": [
            {"kind": "t3", "data": {"name": "t3_demo", "id": "demo",
                                     "title": "A thread worth walking"}}
        ]}},
        {"kind": "Listing", "data": {"children": [
            {"kind": "t1", "data": {"name": "t1_a", "id": "a", "parent_id": "t3_demo",
                                     "author": "alice", "body": "First!", "score": 12}},
            {"kind": "more", "data": {"parent_id": "t3_demo", "children": ["b", "c"]}}
        ]}}
    ]);
    let batch = json!({"json": {"data": {"things": [
        {"kind": "t1", "data": {"name": "t1_b", "id": "b", "parent_id": "t3_demo",
                                 "author": "bob", "body": "Second.", "score": 4}},
        {"kind": "t1", "data": {"name": "t1_c", "id": "c", "parent_id": "t1_b",
                                 "author": "carol", "body": "Replying to Bob.", "score": 2}}
    ]}}});

    let agent = MockAgent::new(vec![
        ("/comments/demo.json".to_string(), page),
        ("children=b,c".to_string(), batch),
    ]);
    let session = Session::new(agent);

    let mut stream = session.comment_stream("demo");
    while let Some(comment) = stream.next().await {
        let comment = comment?;
        println!("[{:>3}] {}: {}", comment.votable.score, comment.author, comment.body);
        for reply in comment.replies() {
            println!("      └ {}: {}", reply.author, reply.body);
        }
    }

    Ok(())
}
