//! Ingestion errors

use thiserror::Error;

/// Errors raised while turning a markdown file into a post.
///
/// All variants are fatal for the collection build: a corrupt post is a
/// build failure, not missing content. The loader attaches the offending
/// file path via `anyhow::Context` when these bubble up.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("missing or malformed frontmatter block")]
    MalformedFrontmatter,

    #[error("required frontmatter field `{field}` is missing")]
    MissingField { field: &'static str },

    #[error("unparseable date `{value}`")]
    InvalidDate { value: String },
}
