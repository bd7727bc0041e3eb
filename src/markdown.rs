//! Line- and pattern-based Markdown to HTML conversion.
//!
//! This is not a Markdown grammar. The body is pushed through a fixed chain of
//! rewrites, each one a pure function of the previous output, so the order of
//! [`RULES`] is part of the behavior: bold runs before italic so that `**x**`
//! never turns into two `<em>` spans, and the paragraph passes only look at
//! what earlier passes left behind. The pattern rules treat `\r\n` as a line
//! ending, so a `\r` never lands inside a tag; the paragraph passes split on
//! `\n` only.
use regex::Regex;

/// A single rewrite of a text block.
pub type Rule = fn(&str) -> String;

/// Every rewrite, in the order [`to_html`] applies them.
pub const RULES: [(&str, Rule); 10] = [
    ("headings", headings),
    ("bold", bold),
    ("italic", italic),
    ("links", links),
    ("paragraph_breaks", paragraph_breaks),
    ("open_paragraphs", open_paragraphs),
    ("close_paragraphs", close_paragraphs),
    ("drop_empty_paragraphs", drop_empty_paragraphs),
    ("unwrap_heading_open", unwrap_heading_open),
    ("unwrap_heading_close", unwrap_heading_close),
];

lazy_static::lazy_static! {
    static ref H1_REGEX: Regex = Regex::new(r"(?mR)^# (.+)$").expect("a valid regex pattern");
    static ref H2_REGEX: Regex = Regex::new(r"(?mR)^## (.+)$").expect("a valid regex pattern");
    static ref H3_REGEX: Regex = Regex::new(r"(?mR)^### (.+)$").expect("a valid regex pattern");
    static ref BOLD_REGEX: Regex =
        Regex::new(r"(?R)\*\*(.+?)\*\*").expect("a valid regex pattern");
    static ref ITALIC_REGEX: Regex =
        Regex::new(r"(?R)\*(.+?)\*").expect("a valid regex pattern");
    static ref LINK_REGEX: Regex =
        Regex::new(r"(?R)\[(.+?)\]\((.+?)\)").expect("a valid regex pattern");
    static ref HEADING_OPEN_REGEX: Regex =
        Regex::new(r"<p>(<h[1-6])").expect("a valid regex pattern");
    static ref HEADING_CLOSE_REGEX: Regex =
        Regex::new(r"(</h[1-6]>)</p>").expect("a valid regex pattern");
}

pub fn to_html(markdown: &str) -> String {
    RULES
        .iter()
        .fold(markdown.to_string(), |text, (_, rule)| rule(&text))
}

/// `#`, `##` and `###` lines become `<h1>` to `<h3>`.
pub fn headings(text: &str) -> String {
    let text = H1_REGEX.replace_all(text, "<h1>${1}</h1>");
    let text = H2_REGEX.replace_all(&text, "<h2>${1}</h2>");
    H3_REGEX.replace_all(&text, "<h3>${1}</h3>").into_owned()
}

pub fn bold(text: &str) -> String {
    BOLD_REGEX
        .replace_all(text, "<strong>${1}</strong>")
        .into_owned()
}

pub fn italic(text: &str) -> String {
    ITALIC_REGEX.replace_all(text, "<em>${1}</em>").into_owned()
}

pub fn links(text: &str) -> String {
    LINK_REGEX
        .replace_all(text, r#"<a href="${2}">${1}</a>"#)
        .into_owned()
}

/// Every blank-line separator closes one paragraph and opens the next.
pub fn paragraph_breaks(text: &str) -> String {
    text.replace("\n\n", "</p><p>")
}

/// Prefixes `<p>` to each line that does not already start with a heading
/// (`<h`, or `<1` to `<6`) or a closing tag.
pub fn open_paragraphs(text: &str) -> String {
    map_lines(text, |line| {
        if starts_block(line) {
            line.to_string()
        } else {
            format!("<p>{}", line)
        }
    })
}

/// Appends `</p>` to each line that does not end in `>`.
pub fn close_paragraphs(text: &str) -> String {
    map_lines(text, |line| {
        if line.ends_with('>') {
            line.to_string()
        } else {
            format!("{}</p>", line)
        }
    })
}

pub fn drop_empty_paragraphs(text: &str) -> String {
    text.replace("<p></p>", "")
}

pub fn unwrap_heading_open(text: &str) -> String {
    HEADING_OPEN_REGEX.replace_all(text, "${1}").into_owned()
}

pub fn unwrap_heading_close(text: &str) -> String {
    HEADING_CLOSE_REGEX.replace_all(text, "${1}").into_owned()
}

fn starts_block(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('<') && matches!(chars.next(), Some('h' | '1'..='6' | '/'))
}

fn map_lines(text: &str, rewrite: impl Fn(&str) -> String) -> String {
    text.split('\n').map(rewrite).collect::<Vec<_>>().join("\n")
}
