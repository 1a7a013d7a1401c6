//! Content loader - builds the post collection from the content directory

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use super::frontmatter;
use super::markdown::{MarkdownRenderer, RenderContext};
use super::post::{Post, PostCollection, PostMetadata};
use crate::Inkpress;

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    app: &'a Inkpress,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(app: &'a Inkpress) -> Self {
        let renderer = MarkdownRenderer::with_theme(&app.config.highlight.theme);
        Self { app, renderer }
    }

    /// Load every post under the content directory.
    ///
    /// Any unreadable or malformed document fails the whole load; the
    /// collection is either complete or absent.
    pub fn load(&self) -> Result<PostCollection> {
        let content_dir = &self.app.content_dir;
        if !content_dir.exists() {
            anyhow::bail!("content directory {} does not exist", content_dir.display());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                let post = self
                    .load_post(path)
                    .with_context(|| format!("failed to load post {}", path.display()))?;
                posts.push(post);
            }
        }

        let collection = PostCollection::new(posts);
        tracing::debug!("loaded {} posts", collection.len());
        Ok(collection)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let raw = fs::read_to_string(path)?;
        let extracted = frontmatter::extract(&raw)?;

        let asset_base = self.asset_base(path);
        let metadata =
            PostMetadata::from_frontmatter(extracted.metadata, &self.app.config.url, &asset_base)?;

        let ctx = RenderContext {
            asset_base,
            slug: metadata.slug.clone(),
        };
        let html = self.renderer.render(extracted.content, &ctx);

        Ok(Post::new(metadata, html))
    }

    /// The post's asset directory: its parent with the content root
    /// stripped, separators normalized to `/`
    fn asset_base(&self, path: &Path) -> String {
        path.parent()
            .and_then(|parent| parent.strip_prefix(&self.app.content_dir).ok())
            .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default()
    }
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
