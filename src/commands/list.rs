//! List posts in the collection

use anyhow::Result;

use crate::server::{PostView, PostsQuery};
use crate::Inkpress;

/// List every post, newest first
pub fn run(app: &Inkpress, json: bool) -> Result<()> {
    let collection = app.load_collection()?;

    if json {
        let query = PostsQuery::default();
        let views: Vec<PostView> = collection
            .iter()
            .map(|post| PostView::new(post, &query))
            .collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    println!("Posts ({}):", collection.len());
    for post in collection.iter() {
        let marker = if post.metadata.published {
            ""
        } else {
            " (draft)"
        };
        println!(
            "  {} - {} [{}]{}",
            post.metadata.date.format("%Y-%m-%d"),
            post.metadata.title,
            post.metadata.slug,
            marker
        );
    }

    Ok(())
}
