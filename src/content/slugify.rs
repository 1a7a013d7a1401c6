//! Heading fragment slugification
//!
//! Deterministic and pure: the same heading text always produces the same
//! fragment, so anchors stay stable across rebuilds.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\w\-]").unwrap();
    static ref REPEATED_HYPHENS: Regex = Regex::new(r"-{2,}").unwrap();
}

// Paired lookup strings: the accented character at index i transliterates
// to the plain character at the same index.
const ACCENTED: &str = "àáäâãåăæçèéëêǵḧìíïîḿńǹñòóöôœøṕŕßśșțùúüûǘẃẍÿźż";
const PLAIN: &str = "aaaaaaaaceeeeghiiiimnnnooooooprssstuuuuuwxyzz";

/// Turn heading text into a URL-safe anchor fragment.
///
/// Lowercases, transliterates the fixed accent table, collapses whitespace
/// runs to single hyphens, spells `&` out as `and`, strips everything that
/// is neither a word character nor a hyphen, and trims hyphen runs.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let transliterated: String = lowered.chars().map(transliterate).collect();
    let hyphenated = WHITESPACE.replace_all(&transliterated, "-");
    let anded = hyphenated.replace('&', "and");
    let stripped = NON_WORD.replace_all(&anded, "");
    let collapsed = REPEATED_HYPHENS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

fn transliterate(c: char) -> char {
    ACCENTED
        .chars()
        .zip(PLAIN.chars())
        .find(|(accented, _)| *accented == c)
        .map(|(_, plain)| plain)
        .unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliteration_table_is_paired() {
        assert_eq!(ACCENTED.chars().count(), PLAIN.chars().count());
    }

    #[test]
    fn test_basic_heading() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_deterministic() {
        let text = "Configuring the Build Pipeline";
        assert_eq!(slugify(text), slugify(text));
    }

    #[test]
    fn test_ampersand_becomes_and() {
        let slug = slugify("A & B");
        assert_eq!(slug, "a-and-b");
        assert!(!slug.contains('&'));
        assert!(!slug.contains(' '));
        assert!(!slug.chars().any(|c| c.is_uppercase()));
    }

    #[test]
    fn test_accents_transliterated() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Señor Über"), "senor-uber");
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("What's new?"), "whats-new");
    }

    #[test]
    fn test_hyphen_runs_collapse() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("  edge  "), "edge");
    }

    #[test]
    fn test_whitespace_runs_become_one_hyphen() {
        assert_eq!(slugify("two\t\twords"), "two-words");
        assert_eq!(slugify("line\nbreak"), "line-break");
    }
}
