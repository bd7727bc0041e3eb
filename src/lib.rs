//! An in-memory static-site project and the small pipeline that builds it.
//!
//! A project is a [`ProjectTree`] of files and folders. Building flattens it
//! and turns every Markdown page with front matter into an HTML
//! [`OutputDocument`] poured into the project's layout:
//!
//! ```
//! use sitepad::{build, seed::default_project, ProjectTree};
//!
//! let tree = ProjectTree::from_forest(default_project()).unwrap();
//! let report = build(&tree);
//!
//! assert!(report.success);
//! assert_eq!(report.output_paths(), ["_site/index.html", "_site/about/index.html"]);
//! ```
pub mod api;
pub mod config;
pub mod errors;
pub mod export;
pub mod frontmatter;
pub mod layout;
pub mod markdown;
pub mod pipeline;
pub mod preview;
pub mod prompt;
pub mod report;
pub mod seed;
pub mod source;
pub mod transactions;
pub mod tree;
pub mod utils;
pub mod vfs;

pub use config::BuildConfig;
pub use pipeline::{build, build_files, build_with};
pub use report::{BuildReport, OutputDocument};
pub use tree::{FileNode, ProjectTree, SourceFile};
