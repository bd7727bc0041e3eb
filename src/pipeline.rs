//! The build: flattened project files in, rendered pages out.
//!
//! Building never touches the file system and never fails outward. Whatever
//! goes wrong is folded into a failed [`BuildReport`], and a failed report
//! carries no pages at all.
use crate::{
    config::BuildConfig,
    frontmatter::FrontMatter,
    layout::Layout,
    markdown,
    report::{BuildReport, OutputDocument},
    tree::{ProjectTree, SourceFile},
};
use miette::Diagnostic;
use regex::Regex;
use thiserror::Error;

const PAGE_INDEX: &str = "index.html";

#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("build setting '{field}' must not be empty")]
    #[diagnostic(code(sitepad::build::empty_setting))]
    EmptySetting { field: &'static str },

    #[error("build setting '{field}' must be a single path segment, got '{value}'")]
    #[diagnostic(code(sitepad::build::nested_setting))]
    NestedSetting { field: &'static str, value: String },

    #[error("unable to compile pattern '{pattern}': {source}")]
    #[diagnostic(code(sitepad::build::pattern))]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unable to render build summary: {source}")]
    #[diagnostic(code(sitepad::build::summary))]
    Summary {
        #[source]
        source: tera::Error,
    },
}

fn compile(pattern: String) -> Result<Regex, BuildError> {
    Regex::new(&pattern).map_err(|error| BuildError::Pattern {
        pattern,
        source: error,
    })
}

/// A build configuration with its path rewrites compiled.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: BuildConfig,
    page_suffix: String,
    input_prefix: Regex,
    page_extension: Regex,
    root_page: Regex,
}
impl Pipeline {
    pub fn new(config: &BuildConfig) -> Result<Self, BuildError> {
        for (field, value) in [
            ("output_dir", &config.output_dir),
            ("markdown_extension", &config.markdown_extension),
        ] {
            if value.is_empty() {
                return Err(BuildError::EmptySetting { field });
            }
        }
        if config.markdown_extension.contains('/') {
            return Err(BuildError::NestedSetting {
                field: "markdown_extension",
                value: config.markdown_extension.clone(),
            });
        }

        Ok(Self {
            config: config.clone(),
            page_suffix: format!(".{}", config.markdown_extension),
            input_prefix: compile(format!("^{}/", regex::escape(&config.input_dir)))?,
            page_extension: compile(format!("\\.{}$", regex::escape(&config.markdown_extension)))?,
            root_page: compile(format!(
                "^{}/{}$",
                regex::escape(&config.root_document),
                regex::escape(PAGE_INDEX)
            ))?,
        })
    }

    pub fn is_page(&self, file: &SourceFile) -> bool {
        file.path.ends_with(&self.page_suffix)
    }

    /// `src/about.md` becomes `_site/about/index.html`; the root document
    /// folds to `_site/index.html`.
    pub fn output_path(&self, input_path: &str) -> String {
        let relative = self.input_prefix.replace(input_path, "");
        let relative = self
            .page_extension
            .replace(&relative, format!("/{}", PAGE_INDEX).as_str());
        let relative = self.root_page.replace(&relative, PAGE_INDEX);

        format!("{}/{}", self.config.output_dir, relative)
    }

    /// Renders one page, or `None` when the file has no front matter.
    pub fn render(&self, file: &SourceFile, layout: &Layout) -> Option<OutputDocument> {
        let Some(front_matter) = FrontMatter::split(&file.content) else {
            log::debug!("skipping '{}': no front matter", file.path);
            return None;
        };

        let title = front_matter.title();
        let html = markdown::to_html(front_matter.body);

        Some(OutputDocument {
            input_path: file.path.clone(),
            output_path: self.output_path(&file.path),
            content: layout.apply(&title, &html),
        })
    }

    pub fn run(&self, files: &[SourceFile]) -> Result<BuildReport, BuildError> {
        let layout = Layout::locate(files, &self.config.layout);

        let documents: Vec<OutputDocument> = files
            .iter()
            .filter(|file| self.is_page(file))
            .filter_map(|file| self.render(file, &layout))
            .collect();

        log::info!("rendered {} pages from {} files", documents.len(), files.len());

        BuildReport::succeeded(documents).map_err(|error| BuildError::Summary { source: error })
    }
}

/// Builds the flattened `files` with `config`.
pub fn build_files(files: &[SourceFile], config: &BuildConfig) -> BuildReport {
    match Pipeline::new(config).and_then(|pipeline| pipeline.run(files)) {
        Ok(report) => report,
        Err(error) => {
            log::warn!("build failed: {}", error);
            BuildReport::failed(&error)
        }
    }
}

pub fn build_with(tree: &ProjectTree, config: &BuildConfig) -> BuildReport {
    build_files(&tree.flatten(), config)
}

pub fn build(tree: &ProjectTree) -> BuildReport {
    build_with(tree, &BuildConfig::default())
}
