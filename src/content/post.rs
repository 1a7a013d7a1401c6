//! Post model and collection

use std::borrow::Cow;

use chrono::NaiveDateTime;
use indexmap::IndexMap;

use super::error::ContentError;
use crate::helpers::date::parse_date_string;
use crate::helpers::html::escape_entities;
use crate::helpers::url::join_url;

/// Normalized post metadata
///
/// The typed form of a frontmatter block. Keys the normalizer does not
/// recognize pass through in `extra` untouched.
#[derive(Debug, Clone)]
pub struct PostMetadata {
    /// Post title
    pub title: String,

    /// Slug (URL-friendly name, the lookup key)
    pub slug: String,

    /// Short description
    pub description: String,

    /// Author name
    pub author: String,

    /// Publication date
    pub date: NaiveDateTime,

    /// The date string exactly as authored
    pub date_raw: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Whether the post is published
    pub published: bool,

    /// Absolute URL of the banner image
    pub banner: String,

    /// Banner attribution
    pub banner_credit: Option<String>,

    /// Original publisher, for syndicated posts
    pub publisher: Option<String>,

    /// URL of the original publication
    pub publish_url: Option<String>,

    /// Canonical URL of this post
    pub canonical_url: String,

    /// Custom frontmatter fields
    pub extra: IndexMap<String, String>,
}

impl PostMetadata {
    /// Normalize a raw frontmatter mapping into typed metadata.
    ///
    /// `origin` is the site origin and `asset_base` the post's asset
    /// directory relative to the content root; together they anchor the
    /// banner and canonical URLs. Missing or unparseable required fields
    /// (`date`, `tags`, `published`, `banner`) are errors.
    pub fn from_frontmatter(
        mut raw: IndexMap<String, String>,
        origin: &str,
        asset_base: &str,
    ) -> Result<Self, ContentError> {
        let title = raw.shift_remove("title").unwrap_or_default();
        let slug = raw.shift_remove("slug").unwrap_or_default();
        let description = raw.shift_remove("description").unwrap_or_default();
        let author = raw.shift_remove("author").unwrap_or_default();

        let date_raw = raw
            .shift_remove("date")
            .ok_or(ContentError::MissingField { field: "date" })?;
        let date = parse_date_string(&date_raw).ok_or_else(|| ContentError::InvalidDate {
            value: date_raw.clone(),
        })?;

        let tags = raw
            .shift_remove("tags")
            .ok_or(ContentError::MissingField { field: "tags" })?
            .split(',')
            .map(|tag| tag.trim().to_string())
            .collect();

        // Strict string equality: "True" and "TRUE" are unpublished.
        let published = raw
            .shift_remove("published")
            .ok_or(ContentError::MissingField { field: "published" })?
            == "true";

        let banner = raw
            .shift_remove("banner")
            .ok_or(ContentError::MissingField { field: "banner" })?;
        let banner = join_url(origin, &[asset_base, &banner]);

        let banner_credit = raw.shift_remove("bannerCredit");
        let publisher = raw.shift_remove("publisher");
        let publish_url = raw.shift_remove("publish_url");

        let canonical_url = raw
            .shift_remove("canonical_url")
            .unwrap_or_else(|| join_url(origin, &["posts", &slug]));

        Ok(Self {
            title,
            slug,
            description,
            author,
            date,
            date_raw,
            tags,
            published,
            banner,
            banner_credit,
            publisher,
            publish_url,
            canonical_url,
            extra: raw,
        })
    }
}

/// A rendered post
#[derive(Debug, Clone)]
pub struct Post {
    /// Normalized metadata
    pub metadata: PostMetadata,

    /// Rendered HTML content
    html: String,
}

impl Post {
    pub fn new(metadata: PostMetadata, html: String) -> Self {
        Self { metadata, html }
    }

    /// The stored HTML, entity-escaped on request for embedding contexts
    pub fn html(&self, html_entities: bool) -> Cow<'_, str> {
        if html_entities {
            Cow::Owned(escape_entities(&self.html))
        } else {
            Cow::Borrowed(&self.html)
        }
    }
}

/// The full set of posts, frozen at build time and ordered newest first
#[derive(Debug, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    /// Build a collection, sorting by date descending. The sort is stable
    /// so same-date posts keep their input order.
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.metadata.date.cmp(&a.metadata.date));
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    /// List posts, optionally filtered by published state, preserving the
    /// stored order
    pub fn query(&self, published: Option<bool>) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| published.map_or(true, |want| post.metadata.published == want))
            .collect()
    }

    /// Look a post up by slug. A miss is `None`, never an error.
    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.metadata.slug == slug)
    }

    /// Slugs carried by more than one post, for diagnostics
    pub fn duplicate_slugs(&self) -> Vec<String> {
        let mut seen = IndexMap::new();
        for post in &self.posts {
            *seen.entry(post.metadata.slug.as_str()).or_insert(0usize) += 1;
        }
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(slug, _)| slug.to_string())
            .collect()
    }
}
