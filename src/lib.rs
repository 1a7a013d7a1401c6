//! inkpress: a markdown blog content pipeline
//!
//! Posts are markdown documents with a key:value frontmatter header. At
//! startup the whole content directory is ingested into an immutable,
//! date-sorted collection; a small JSON API and a couple of CLI commands
//! query it.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;

use anyhow::Result;
use std::path::Path;

/// The main application: configuration plus resolved directories
pub struct Inkpress {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory
    pub content_dir: std::path::PathBuf,
}

impl Inkpress {
    /// Create an instance from a project directory, reading `inkpress.yml`
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("inkpress.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Ingest the content directory into a frozen collection
    pub fn load_collection(&self) -> Result<content::PostCollection> {
        content::ContentLoader::new(self).load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_config_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = Inkpress::new(dir.path()).unwrap();
        assert_eq!(app.config.url, "https://example.com");
        assert_eq!(app.content_dir, dir.path().join("content"));
    }

    #[test]
    fn test_new_reads_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("inkpress.yml"),
            "url: https://blog.example.dev\ncontent_dir: posts\n",
        )
        .unwrap();

        let app = Inkpress::new(dir.path()).unwrap();
        assert_eq!(app.config.url, "https://blog.example.dev");
        assert_eq!(app.content_dir, dir.path().join("posts"));
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("inkpress.yml"), "url: [unclosed\n").unwrap();
        assert!(Inkpress::new(dir.path()).is_err());
    }
}
