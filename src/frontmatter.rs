use regex::Regex;

const UNTITLED: &str = "Untitled";

lazy_static::lazy_static! {
    static ref FRONT_MATTER_REGEX: Regex = Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z")
        .expect("a valid regex pattern");
    static ref TITLE_REGEX: Regex = Regex::new(r"title:\s*(.+)")
        .expect("a valid regex pattern");
}

/// A document split into its `---` delimited metadata block and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    pub block: &'a str,
    pub body: &'a str,
}
impl<'a> FrontMatter<'a> {
    /// Returns `None` when the document does not open with a front matter
    /// block; such documents produce no page.
    pub fn split(content: &'a str) -> Option<Self> {
        let captures = FRONT_MATTER_REGEX.captures(content)?;

        Some(Self {
            block: captures.get(1).map_or("", |m| m.as_str()),
            body: captures.get(2).map_or("", |m| m.as_str()),
        })
    }

    /// Value of the first `title:` entry, trimmed, or `"Untitled"`.
    pub fn title(&self) -> String {
        TITLE_REGEX
            .captures(self.block)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().trim().to_string())
            .unwrap_or_else(|| UNTITLED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_block_and_body() {
        let doc = FrontMatter::split("---\ntitle: Hello\n---\n# Hi").expect("front matter");

        assert_eq!(doc.block, "title: Hello");
        assert_eq!(doc.body, "# Hi");
        assert_eq!(doc.title(), "Hello");
    }

    #[test]
    fn body_may_be_empty() {
        let doc = FrontMatter::split("---\ntitle: x\n---\n").expect("front matter");

        assert_eq!(doc.body, "");
    }

    #[test]
    fn block_ends_at_first_closing_delimiter() {
        let doc = FrontMatter::split("---\na: 1\n---\nbody\n---\nmore").expect("front matter");

        assert_eq!(doc.block, "a: 1");
        assert_eq!(doc.body, "body\n---\nmore");
    }

    #[test]
    fn documents_without_delimiters_do_not_split() {
        assert_eq!(FrontMatter::split("# Just markdown\n"), None);
        assert_eq!(FrontMatter::split("text\n---\ntitle: x\n---\n"), None);
        assert_eq!(FrontMatter::split("---\ntitle: x\n---"), None);
    }

    #[test]
    fn title_is_trimmed_and_other_keys_ignored() {
        let doc = FrontMatter::split("---\nlayout: base.njk\ntitle:   Spaced out   \n---\nbody")
            .expect("front matter");

        assert_eq!(doc.title(), "Spaced out");
    }

    #[test]
    fn missing_title_defaults_to_untitled() {
        let doc = FrontMatter::split("---\nlayout: base.njk\n---\nbody").expect("front matter");

        assert_eq!(doc.title(), "Untitled");
    }
}
