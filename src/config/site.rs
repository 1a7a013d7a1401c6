//! Site configuration (inkpress.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site origin used for banner and canonical URLs
    pub url: String,

    /// Directory holding the markdown posts, relative to the project root
    pub content_dir: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            content_dir: "content".to_string(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.url, "https://example.com");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let yaml = "url: https://blog.example.dev\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.url, "https://blog.example.dev");
        assert_eq!(config.content_dir, "content");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
url: https://blog.example.dev
content_dir: posts
highlight:
  theme: InspiredGitHub
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.highlight.theme, "InspiredGitHub");
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        let yaml = "url: https://blog.example.dev\nfuture_option: true\n";
        assert!(serde_yaml::from_str::<SiteConfig>(yaml).is_ok());
    }
}
