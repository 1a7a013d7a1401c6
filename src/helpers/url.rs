//! URL helper functions

/// Join path segments onto a site origin.
///
/// Segments are glued with single slashes: backslashes become forward
/// slashes, empty segments are skipped and accidental double slashes are
/// collapsed everywhere except the scheme boundary.
///
/// # Examples
/// ```ignore
/// join_url("https://example.com/", &["posts", "my-post"])
/// // -> "https://example.com/posts/my-post"
/// ```
pub fn join_url(origin: &str, segments: &[&str]) -> String {
    let mut url = origin.trim_end_matches('/').to_string();

    for segment in segments {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(segment);
    }

    collapse_double_slashes(&url)
}

/// Build a site-root-relative path for a colocated asset
pub fn site_root_path(base: &str, file: &str) -> String {
    let joined = join_url("", &[base, file]);
    if joined.starts_with('/') {
        joined
    } else {
        format!("/{}", joined)
    }
}

fn collapse_double_slashes(url: &str) -> String {
    let (scheme, rest) = match url.find("://") {
        Some(idx) => url.split_at(idx + 3),
        None => ("", url),
    };

    let mut collapsed = String::with_capacity(rest.len());
    let mut last_was_slash = false;
    for c in rest.chars() {
        if c == '/' && last_was_slash {
            continue;
        }
        last_was_slash = c == '/';
        collapsed.push(c);
    }

    format!("{}{}", scheme, collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_basic() {
        assert_eq!(
            join_url("https://example.com", &["posts", "my-post"]),
            "https://example.com/posts/my-post"
        );
    }

    #[test]
    fn test_join_url_normalizes_separators() {
        assert_eq!(
            join_url("https://example.com/", &["writing\\demo", "banner.jpg"]),
            "https://example.com/writing/demo/banner.jpg"
        );
    }

    #[test]
    fn test_join_url_collapses_doubles_but_keeps_scheme() {
        assert_eq!(
            join_url("https://example.com//", &["a//b", "/c/"]),
            "https://example.com/a/b/c"
        );
    }

    #[test]
    fn test_join_url_skips_empty_segments() {
        assert_eq!(
            join_url("https://example.com", &["", "banner.jpg"]),
            "https://example.com/banner.jpg"
        );
    }

    #[test]
    fn test_site_root_path() {
        assert_eq!(site_root_path("writing/demo", "cat.png"), "/writing/demo/cat.png");
        assert_eq!(site_root_path("", "cat.png"), "/cat.png");
    }
}
