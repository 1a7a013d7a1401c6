//! JSON query API over the post collection
//!
//! Two read-only endpoints: `/api/posts` lists the collection (optionally
//! filtered by published state) and `/api/posts/{slug}` looks a single post
//! up. A miss on the lookup is a JSON `null`, not an HTTP error.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::content::{Post, PostCollection};
use crate::helpers::date::human_date;

/// Query parameters shared by both endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostsQuery {
    /// Filter by published state; absent means no filter
    pub published: Option<bool>,

    /// Entity-escape the returned HTML
    #[serde(rename = "htmlEntities")]
    pub html_entities: bool,

    /// Date rendering mode; `human` selects the friendly form
    #[serde(rename = "displayAs")]
    pub display_as: Option<String>,
}

/// Wire form of a post
#[derive(Debug, Serialize)]
pub struct PostView {
    pub html: String,
    pub metadata: MetadataView,
}

/// Wire form of post metadata
#[derive(Debug, Serialize)]
pub struct MetadataView {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub author: String,
    pub date: String,
    pub tags: Vec<String>,
    pub banner: String,
    #[serde(rename = "bannerCredit")]
    pub banner_credit: Option<String>,
    pub published: bool,
    pub publisher: Option<String>,
    pub publish_url: Option<String>,
    pub canonical_url: String,
}

impl PostView {
    /// Project a post into its wire form under the given query options
    pub fn new(post: &Post, query: &PostsQuery) -> Self {
        let metadata = &post.metadata;
        let date = match query.display_as.as_deref() {
            Some("human") => human_date(&metadata.date),
            _ => metadata.date_raw.clone(),
        };

        Self {
            html: post.html(query.html_entities).into_owned(),
            metadata: MetadataView {
                title: metadata.title.clone(),
                slug: metadata.slug.clone(),
                description: metadata.description.clone(),
                author: metadata.author.clone(),
                date,
                tags: metadata.tags.clone(),
                banner: metadata.banner.clone(),
                banner_credit: metadata.banner_credit.clone(),
                published: metadata.published,
                publisher: metadata.publisher.clone(),
                publish_url: metadata.publish_url.clone(),
                canonical_url: metadata.canonical_url.clone(),
            },
        }
    }
}

/// Build the API router over a frozen collection
pub fn router(collection: Arc<PostCollection>) -> Router {
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .layer(TraceLayer::new_for_http())
        .with_state(collection)
}

/// Start the query server
pub async fn start(collection: Arc<PostCollection>, ip: &str, port: u16) -> Result<()> {
    let app = router(collection.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!(
        "Serving {} posts at http://{}:{}/api/posts",
        collection.len(),
        ip,
        port
    );
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_posts(
    State(collection): State<Arc<PostCollection>>,
    Query(query): Query<PostsQuery>,
) -> Json<Vec<PostView>> {
    let posts = collection
        .query(query.published)
        .into_iter()
        .map(|post| PostView::new(post, &query))
        .collect();
    Json(posts)
}

async fn get_post(
    State(collection): State<Arc<PostCollection>>,
    Path(slug): Path<String>,
    Query(query): Query<PostsQuery>,
) -> Json<Option<PostView>> {
    Json(collection.find(&slug).map(|post| PostView::new(post, &query)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostMetadata;
    use chrono::NaiveDate;
    use indexmap::IndexMap;

    fn sample_post() -> Post {
        let metadata = PostMetadata {
            title: "Sample".to_string(),
            slug: "sample".to_string(),
            description: "A sample post".to_string(),
            author: "Ada".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            date_raw: "2024-01-15 10:00:00".to_string(),
            tags: vec!["rust".to_string()],
            published: true,
            banner: "https://example.com/writing/sample/banner.jpg".to_string(),
            banner_credit: None,
            publisher: None,
            publish_url: None,
            canonical_url: "https://example.com/posts/sample".to_string(),
            extra: IndexMap::new(),
        };
        Post::new(metadata, "<p>A & B</p>".to_string())
    }

    #[test]
    fn test_view_date_defaults_to_raw_string() {
        let view = PostView::new(&sample_post(), &PostsQuery::default());
        assert_eq!(view.metadata.date, "2024-01-15 10:00:00");
    }

    #[test]
    fn test_view_human_date_mode() {
        let query = PostsQuery {
            display_as: Some("human".to_string()),
            ..Default::default()
        };
        let view = PostView::new(&sample_post(), &query);
        assert_eq!(view.metadata.date, "January 15th 2024");
    }

    #[test]
    fn test_view_html_escaping_opt_in() {
        let plain = PostView::new(&sample_post(), &PostsQuery::default());
        assert_eq!(plain.html, "<p>A & B</p>");

        let query = PostsQuery {
            html_entities: true,
            ..Default::default()
        };
        let escaped = PostView::new(&sample_post(), &query);
        assert_eq!(escaped.html, "&lt;p&gt;A &amp; B&lt;/p&gt;");
    }

    #[test]
    fn test_view_serializes_wire_field_names() {
        let view = PostView::new(&sample_post(), &PostsQuery::default());
        let value = serde_json::to_value(&view).unwrap();
        let metadata = &value["metadata"];

        for key in [
            "title",
            "slug",
            "description",
            "author",
            "date",
            "tags",
            "banner",
            "bannerCredit",
            "published",
            "publisher",
            "publish_url",
            "canonical_url",
        ] {
            assert!(metadata.get(key).is_some(), "missing key: {}", key);
        }
        assert!(value.get("html").is_some());
    }

    #[test]
    fn test_query_param_names() {
        let query: PostsQuery = serde_json::from_str(
            r#"{"published": true, "htmlEntities": true, "displayAs": "human"}"#,
        )
        .unwrap();
        assert_eq!(query.published, Some(true));
        assert!(query.html_entities);
        assert_eq!(query.display_as.as_deref(), Some("human"));
    }

    #[test]
    fn test_query_params_all_optional() {
        let query: PostsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.published, None);
        assert!(!query.html_entities);
        assert_eq!(query.display_as, None);
    }
}
