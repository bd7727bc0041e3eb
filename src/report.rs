use serde::Serialize;
use std::fmt;
use tera::{Context, Tera};

const FAILURE_PREFIX: &str = "Build failed: ";
const UNKNOWN_ERROR: &str = "Unknown error";
const PREVIEW_MARKER: &str = "index.html";

/// Summary shown in the build log. Kept free of a trailing newline.
const SUMMARY_TEMPLATE: &str = "✅ Build completed successfully!

Generated {{ documents | length }} pages:
{% for document in documents %}- {{ document.output_path }}{% if not loop.last %}
{% endif %}{% endfor %}";

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDocument {
    pub input_path: String,
    pub output_path: String,
    pub content: String,
}

/// Outcome of one build. Each build produces a fresh report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub success: bool,
    /// Summary on success, error message on failure.
    pub message: String,
    pub documents: Vec<OutputDocument>,
}
impl BuildReport {
    pub fn succeeded(documents: Vec<OutputDocument>) -> Result<Self, tera::Error> {
        let mut context = Context::new();
        context.insert("documents", &documents);

        let message = Tera::one_off(SUMMARY_TEMPLATE, &context, false)?;

        Ok(Self {
            success: true,
            message,
            documents,
        })
    }

    /// A failed report never carries documents.
    pub fn failed(error: &dyn fmt::Display) -> Self {
        let detail = error.to_string();
        let detail = if detail.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            detail
        };

        Self {
            success: false,
            message: format!("{}{}", FAILURE_PREFIX, detail),
            documents: Vec::new(),
        }
    }

    /// Page a previewer opens first: the first one whose output path contains
    /// `index.html`, otherwise the first page.
    pub fn preview_document(&self) -> Option<&OutputDocument> {
        if !self.success {
            return None;
        }

        self.documents
            .iter()
            .find(|document| document.output_path.contains(PREVIEW_MARKER))
            .or_else(|| self.documents.first())
    }

    pub fn document(&self, output_path: &str) -> Option<&OutputDocument> {
        self.documents
            .iter()
            .find(|document| document.output_path == output_path)
    }

    pub fn output_paths(&self) -> Vec<&str> {
        self.documents
            .iter()
            .map(|document| document.output_path.as_str())
            .collect()
    }
}
