//! Markdown rendering with syntax highlighting
//!
//! The renderer walks the pulldown-cmark event stream and replaces the
//! default output for code fences, inline code, images, links and headings
//! with project-specific markup. Each replacement is a pure function from
//! (node content, render context) to an HTML string spliced back into the
//! stream as an `Event::Html`.

use std::borrow::Cow;
use std::collections::BTreeSet;

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::slugify::slugify;
use crate::helpers::html::escape_entities;
use crate::helpers::url::site_root_path;

lazy_static! {
    static ref LEADING_TABS: Regex = Regex::new(r"(?m)^\t+").unwrap();
    static ref BRACE_GROUP: Regex = Regex::new(r"\{([^{}]*)\}").unwrap();
}

/// Per-post context the render rules need: where the post's colocated
/// assets live (relative to the content root) and the post's slug for
/// heading self-links.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub asset_base: String,
    pub slug: String,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a renderer with the default highlighting theme
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark")
    }

    /// Create a renderer with a named syntect theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            // The extended bundle carries TypeScript and GraphQL, which the
            // syntect default dump does not.
            syntax_set: two_face::syntax::extra_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, content: &str, ctx: &RenderContext) -> String {
        let normalized = normalize_tabs(content);
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(&normalized, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code: Option<CodeCapture> = None;
        let mut heading: Option<HeadingCapture> = None;
        let mut image: Option<ImageCapture> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let annotation = match kind {
                        CodeBlockKind::Fenced(info) => info.trim().to_string(),
                        CodeBlockKind::Indented => String::new(),
                    };
                    code = Some(CodeCapture {
                        annotation,
                        content: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code.take() {
                        let rendered = self.render_code_block(&block.content, &block.annotation);
                        events.push(Event::Html(CowStr::from(rendered)));
                    }
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    heading = Some(HeadingCapture {
                        rank: heading_rank(level),
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(captured) = heading.take() {
                        let rendered = render_heading(captured.rank, &captured.text, ctx);
                        events.push(Event::Html(CowStr::from(rendered)));
                    }
                }
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    // Inside a heading only the alt text survives, carried by
                    // the Text events that follow.
                    if heading.is_none() {
                        image = Some(ImageCapture {
                            dest: dest_url.to_string(),
                            title: title.to_string(),
                            alt: String::new(),
                        });
                    }
                }
                Event::End(TagEnd::Image) => {
                    if let Some(captured) = image.take() {
                        events.push(Event::Html(CowStr::from(render_image(&captured, ctx))));
                    }
                }
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) => {
                    if heading.is_none() && image.is_none() {
                        events.push(Event::Html(CowStr::from(render_link_open(
                            &dest_url, &title,
                        ))));
                    }
                }
                Event::End(TagEnd::Link) => {
                    if heading.is_none() && image.is_none() {
                        events.push(Event::Html(CowStr::from("</a>")));
                    }
                }
                Event::Text(text) => {
                    if let Some(block) = code.as_mut() {
                        block.content.push_str(&text);
                    } else if let Some(captured) = heading.as_mut() {
                        captured.text.push_str(&text);
                    } else if let Some(captured) = image.as_mut() {
                        captured.alt.push_str(&text);
                    } else {
                        events.push(Event::Text(text));
                    }
                }
                Event::Code(text) => {
                    if let Some(captured) = heading.as_mut() {
                        captured.text.push_str(&text);
                    } else if let Some(captured) = image.as_mut() {
                        captured.alt.push_str(&text);
                    } else {
                        events.push(Event::Html(CowStr::from(render_inline_code(&text))));
                    }
                }
                Event::SoftBreak | Event::HardBreak
                    if heading.is_some() || image.is_some() =>
                {
                    if let Some(captured) = heading.as_mut() {
                        captured.text.push(' ');
                    } else if let Some(captured) = image.as_mut() {
                        captured.alt.push(' ');
                    }
                }
                other => {
                    if code.is_none() && heading.is_none() && image.is_none() {
                        events.push(other);
                    }
                }
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    /// Render one fenced or indented code block
    fn render_code_block(&self, code: &str, annotation: &str) -> String {
        let fence = parse_fence_annotation(annotation);

        let resolved = match fence.language.as_deref() {
            None => None,
            Some(token) => match resolve_language(token) {
                Some(resolved) => Some(resolved),
                None => {
                    tracing::warn!(
                        "unknown code fence language `{}`, emitting plain block",
                        token
                    );
                    return plain_block(code, None, fence.filename.as_deref());
                }
            },
        };

        match resolved {
            Some((grammar, token)) => self.highlight_block(
                code,
                grammar,
                token,
                &fence.highlights,
                fence.filename.as_deref(),
            ),
            None => plain_block(code, Some("text"), fence.filename.as_deref()),
        }
    }

    fn highlight_block(
        &self,
        code: &str,
        grammar: &str,
        token: &str,
        highlights: &BTreeSet<usize>,
        filename: Option<&str>,
    ) -> String {
        let Some(syntax) = self.syntax_set.find_syntax_by_token(token) else {
            tracing::warn!("no grammar registered for `{}`, emitting plain block", token);
            return plain_block(code, None, filename);
        };

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        match self.highlight_lines(code, syntax, theme, highlights) {
            Ok(body) => format!(
                r#"<pre class="language-{}"><code>{}</code>{}</pre>"#,
                grammar,
                body,
                caption_html(filename)
            ),
            Err(e) => {
                tracing::warn!("highlighting failed for `{}`: {}", token, e);
                plain_block(code, Some(grammar), filename)
            }
        }
    }

    /// Highlight line by line so highlighted lines can carry the project's
    /// `highlight-line` class.
    fn highlight_lines(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        theme: &Theme,
        highlights: &BTreeSet<usize>,
    ) -> Result<String, syntect::Error> {
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut body = String::new();

        for (idx, line) in LinesWithEndings::from(code).enumerate() {
            let regions = highlighter.highlight_line(line, &self.syntax_set)?;
            let rendered = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)?;
            if highlights.contains(&(idx + 1)) {
                body.push_str("<span class=\"highlight-line\">");
                body.push_str(&rendered);
                body.push_str("</span>");
            } else {
                body.push_str(&rendered);
            }
        }

        Ok(body)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

struct CodeCapture {
    annotation: String,
    content: String,
}

struct HeadingCapture {
    rank: u8,
    text: String,
}

struct ImageCapture {
    dest: String,
    title: String,
    alt: String,
}

/// Parsed form of a fence annotation like `ts{2-3}{7}:example.ts`
#[derive(Debug, Default, PartialEq)]
struct FenceAnnotation {
    language: Option<String>,
    highlights: BTreeSet<usize>,
    filename: Option<String>,
}

/// Parse a fence annotation. The base language token runs to the first `{`
/// or `:`; every `{...}` group adds 1-based line numbers to highlight and a
/// trailing `:name` names the file caption. Unparseable fragments are
/// skipped, never fatal.
fn parse_fence_annotation(info: &str) -> FenceAnnotation {
    let info = info.trim();
    let base_end = info.find(['{', ':']).unwrap_or(info.len());
    let token = info[..base_end].trim();
    let language = (!token.is_empty()).then(|| token.to_string());

    let mut highlights = BTreeSet::new();
    let mut filename = None;
    let mut rest = &info[base_end..];

    loop {
        if let Some(group) = rest.strip_prefix('{') {
            match group.find('}') {
                Some(end) => {
                    expand_ranges(&group[..end], &mut highlights);
                    rest = &group[end + 1..];
                }
                None => break,
            }
        } else if let Some(name) = rest.strip_prefix(':') {
            let name = name.trim();
            if !name.is_empty() {
                filename = Some(name.to_string());
            }
            break;
        } else {
            break;
        }
    }

    FenceAnnotation {
        language,
        highlights,
        filename,
    }
}

/// Expand a comma-separated list of `n` and `n-m` items into line numbers
fn expand_ranges(group: &str, out: &mut BTreeSet<usize>) {
    for item in group.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if let Some((lo, hi)) = item.split_once('-') {
            if let (Ok(lo), Ok(hi)) = (lo.trim().parse::<usize>(), hi.trim().parse::<usize>()) {
                out.extend(lo..=hi);
            }
        } else if let Ok(n) = item.parse::<usize>() {
            out.insert(n);
        }
    }
}

/// The fixed extension-to-grammar table: (css grammar name, syntect token)
fn resolve_language(token: &str) -> Option<(&'static str, &'static str)> {
    match token {
        "sh" | "bash" => Some(("bash", "bash")),
        "html" | "svelte" => Some(("markup", "html")),
        "js" => Some(("javascript", "javascript")),
        "ts" => Some(("typescript", "typescript")),
        "json" => Some(("json", "json")),
        "css" => Some(("css", "css")),
        "txt" => Some(("textile", "textile")),
        "graphql" | "gql" => Some(("graphql", "graphql")),
        "yaml" | "yml" => Some(("yaml", "yaml")),
        _ => None,
    }
}

/// Unhighlighted fallback block. `language` is absent for unknown tokens
/// and `text` for unannotated fences.
fn plain_block(code: &str, language: Option<&str>, filename: Option<&str>) -> String {
    let caption = caption_html(filename);
    match language {
        Some(lang) => format!(
            r#"<pre class="language-{}"><code>{}</code>{}</pre>"#,
            lang,
            escape_entities(code),
            caption
        ),
        None => format!("<pre><code>{}</code>{}</pre>", escape_entities(code), caption),
    }
}

fn caption_html(filename: Option<&str>) -> String {
    filename
        .map(|name| format!(r#"<div class="code-caption">{}</div>"#, escape_entities(name)))
        .unwrap_or_default()
}

/// Inline code always renders as plain text, never highlighted
fn render_inline_code(code: &str) -> String {
    format!(
        r#"<code class="language-text">{}</code>"#,
        escape_entities(code)
    )
}

fn render_image(image: &ImageCapture, ctx: &RenderContext) -> String {
    let src = if is_absolute_url(&image.dest) {
        image.dest.clone()
    } else {
        site_root_path(&ctx.asset_base, &image.dest)
    };
    let title_attr = if image.title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_entities(&image.title))
    };
    format!(
        r#"<img src="{}" alt="{}" loading="lazy"{}>"#,
        escape_entities(&src),
        escape_entities(&image.alt),
        title_attr
    )
}

/// Site-relative links get a prefetch hint; external links are left alone
fn render_link_open(dest: &str, title: &str) -> String {
    let mut tag = format!(r#"<a href="{}""#, escape_entities(dest));
    if dest.starts_with('/') {
        tag.push_str(r#" rel="prefetch""#);
    }
    if !title.is_empty() {
        tag.push_str(&format!(r#" title="{}""#, escape_entities(title)));
    }
    tag.push('>');
    tag
}

/// Render a heading as a self-linking anchor with a deterministic fragment
fn render_heading(rank: u8, raw_text: &str, ctx: &RenderContext) -> String {
    let (fragment, visible) = heading_fragment(raw_text);
    format!(
        r##"<h{rank} id="{frag}"><a href="posts/{slug}#{frag}" aria-hidden="true">{text}</a></h{rank}>"##,
        rank = rank,
        frag = escape_entities(&fragment),
        slug = escape_entities(&ctx.slug),
        text = escape_entities(&visible),
    )
}

/// The fragment is an explicit `{...}` override embedded in the heading text
/// when present, otherwise the slugified visible text. All `{...}` groups are
/// stripped from the visible text either way.
fn heading_fragment(raw: &str) -> (String, String) {
    let explicit = BRACE_GROUP
        .captures(raw)
        .map(|caps| caps[1].trim().to_string())
        .filter(|fragment| !fragment.is_empty());
    let visible = BRACE_GROUP.replace_all(raw, "").trim().to_string();
    let fragment = explicit.unwrap_or_else(|| slugify(&visible));
    (fragment, visible)
}

fn heading_rank(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Rewrite leading tab runs to two-space indents so indentation-sensitive
/// nested lists render the same regardless of the source editor's tab width.
fn normalize_tabs(content: &str) -> Cow<'_, str> {
    LEADING_TABS.replace_all(content, |caps: &regex::Captures| {
        "  ".repeat(caps[0].len())
    })
}

fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}
