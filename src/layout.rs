use crate::tree::SourceFile;
use regex::{NoExpand, Regex};

lazy_static::lazy_static! {
    static ref TITLE_PLACEHOLDER_REGEX: Regex =
        Regex::new(r"\{\{\s*title\s*\}\}").expect("a valid regex pattern");
    static ref CONTENT_PLACEHOLDER_REGEX: Regex =
        Regex::new(r"\{\{\s*content\s*\|\s*safe\s*\}\}").expect("a valid regex pattern");
}

/// The page shell every rendered document is poured into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    body: String,
}
impl Layout {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }

    /// Uses the first file whose path contains `marker`. A project without one
    /// gets the empty layout, so every page renders empty.
    pub fn locate(files: &[SourceFile], marker: &str) -> Self {
        match files.iter().find(|file| file.path.contains(marker)) {
            Some(file) => {
                log::debug!("using layout '{}'", file.path);
                Self::new(&file.content)
            }
            None => {
                log::debug!("no layout matching '{}', pages will be empty", marker);
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Substitutes `{{ title }}` first and `{{ content | safe }}` second.
    /// Both values are inserted literally.
    pub fn apply(&self, title: &str, html: &str) -> String {
        let page = TITLE_PLACEHOLDER_REGEX.replace_all(&self.body, NoExpand(title));

        CONTENT_PLACEHOLDER_REGEX
            .replace_all(&page, NoExpand(html))
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_ignore_inner_whitespace() {
        let layout = Layout::new("<title>{{title}}</title>{{  content|safe }}|{{ title }}");

        assert_eq!(layout.apply("Home", "<h1>Hi</h1>"), "<title>Home</title><h1>Hi</h1>|Home");
    }

    #[test]
    fn other_placeholders_are_left_alone() {
        let layout = Layout::new("{{ site.name }} {{ content }} {% block x %}");

        assert_eq!(layout.apply("t", "c"), "{{ site.name }} {{ content }} {% block x %}");
    }

    #[test]
    fn values_are_inserted_literally() {
        let layout = Layout::new("{{ title }}:{{ content | safe }}");

        assert_eq!(layout.apply("$1 deals", "costs $0"), "$1 deals:costs $0");
    }

    #[test]
    fn empty_layout_renders_nothing() {
        assert_eq!(Layout::default().apply("t", "<p>body</p>"), "");
    }

    #[test]
    fn locate_picks_the_first_matching_path() {
        let files = vec![
            SourceFile::new("src/index.md", "x"),
            SourceFile::new("src/_includes/base.njk", "first"),
            SourceFile::new("other/base.njk", "second"),
        ];

        assert_eq!(Layout::locate(&files, "base.njk"), Layout::new("first"));
        assert!(Layout::locate(&files, "missing.njk").is_empty());
    }
}
