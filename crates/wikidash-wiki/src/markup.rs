//! Wiki markup to display blocks.
//!
//! The extract returned by the API is mostly plain text, but `== Section ==`
//! headings, bold/italic quotes, internal links and citation markers leak
//! through. [`render_summary`] turns that into a flat list of headings and
//! paragraphs; paragraph content is an HTML fragment whose only tags are
//! `<strong>` and `<em>`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=+\s*.+\s*=+$").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// One rendered block of the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum DisplayBlock {
    /// Plain heading text, `=` markers removed.
    Heading(String),
    /// Cleaned HTML fragment.
    Paragraph(String),
}

/// A single substitution applied by [`clean_markup`].
#[derive(Debug)]
pub struct MarkupRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl MarkupRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid regex"),
            replacement,
        }
    }

    /// Replaces every match in `input`.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement)
            .into_owned()
    }
}

static CLEANING_RULES: LazyLock<Vec<MarkupRule>> = LazyLock::new(|| {
    vec![
        MarkupRule::new("bold", r"'''([^']+)'''", "<strong>${1}</strong>"),
        MarkupRule::new("italic", r"''([^']+)''", "<em>${1}</em>"),
        MarkupRule::new("piped_link", r"\[\[([^\]|]+)\|([^\]]+)\]\]", "${2}"),
        MarkupRule::new("plain_link", r"\[\[([^\]]+)\]\]", "${1}"),
        MarkupRule::new(
            "labelled_external_link",
            r"\[https?://[^\s\]]+\s+([^\]]+)\]",
            "${1}",
        ),
        MarkupRule::new("bare_external_link", r"\[https?://[^\s\]]+\]", ""),
        MarkupRule::new("file_link", r"(?i)\[\[(?:file|image):[^\]]*\]\]", ""),
        MarkupRule::new(
            "citation_marker",
            r"(?i)\[(?:\d+|citation needed|when\?|by whom\?|according to whom\?)\]",
            "",
        ),
    ]
});

/// The substitutions of [`clean_markup`], in application order. Whitespace
/// collapsing runs after the last one.
#[must_use]
pub fn cleaning_rules() -> &'static [MarkupRule] {
    &CLEANING_RULES
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Cleans a single line of wiki text into an HTML fragment.
#[must_use]
pub fn clean_markup(line: &str) -> String {
    let mut text = escape_html(line);
    for rule in cleaning_rules() {
        text = rule.apply(&text);
    }
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Splits `raw` into headings and paragraphs. Blank lines, and lines that
/// end up empty after cleaning, produce nothing.
#[must_use]
pub fn render_summary(raw: &str) -> Vec<DisplayBlock> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            if HEADING_RE.is_match(line) {
                let text = line.replace('=', "");
                let text = text.trim();
                (!text.is_empty()).then(|| DisplayBlock::Heading(text.to_string()))
            } else {
                let html = clean_markup(line);
                (!html.is_empty()).then_some(DisplayBlock::Paragraph(html))
            }
        })
        .collect()
}
