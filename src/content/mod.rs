//! Content module - frontmatter extraction, rendering and the post collection

pub mod error;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod post;
pub mod slugify;

pub use error::ContentError;
pub use loader::ContentLoader;
pub use markdown::{MarkdownRenderer, RenderContext};
pub use post::{Post, PostCollection, PostMetadata};
pub use slugify::slugify;
