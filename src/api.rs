use crate::{
    config::{BuildConfig, ConfigError},
    export::{self, ExportError},
    pipeline,
    report::BuildReport,
    source::{self, SourceError},
    transactions::FinalTransactionState,
    tree::ProjectTree,
    utils::normalize_path,
};
use std::path::Path;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SitepadError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),

    #[error("no file or folder with id '{id}' in the project")]
    #[diagnostic(
        code(sitepad::api::unknown_node),
        help("Run `sitepad tree` to list node identifiers")
    )]
    UnknownNode { id: String },
}

/// A replacement for one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub id: String,
    pub content: String,
}

/// Opens a project, either from `directory` or the built-in default, and
/// loads the build configuration.
///
/// # Errors
///
/// Returns a [`SitepadError`] if:
///
/// - The project directory cannot be read or is not valid UTF-8 text.
/// - The configuration file cannot be read or parsed.
pub fn open_project(
    directory: Option<&Path>,
    config: Option<&Path>,
) -> Result<(ProjectTree, BuildConfig), SitepadError> {
    let tree = source::open(directory)?;
    let config = BuildConfig::load(config)?;

    log::debug!("opened project with {} nodes", tree.len());

    Ok((tree, config))
}

/// Applies content edits and folder toggles the way the editor would.
///
/// # Errors
///
/// Returns [`SitepadError::UnknownNode`] for an id that is not in the tree. An
/// edit aimed at a folder, or a toggle aimed at a file, is ignored.
pub fn apply_edits(
    mut tree: ProjectTree,
    edits: &[Edit],
    toggles: &[String],
) -> Result<ProjectTree, SitepadError> {
    for edit in edits {
        if tree.find(&edit.id).is_none() {
            return Err(SitepadError::UnknownNode {
                id: edit.id.clone(),
            });
        }
        if !tree.set_content(&edit.id, &edit.content) {
            log::warn!("'{}' is a folder, content edit ignored", edit.id);
        }
    }

    for id in toggles {
        if tree.find(id).is_none() {
            return Err(SitepadError::UnknownNode { id: id.clone() });
        }
        if !tree.toggle_folder(id) {
            log::warn!("'{}' is a file, toggle ignored", id);
        }
    }

    Ok(tree)
}

/// Builds the project. Build problems are reported in the returned
/// [`BuildReport`], never as an error.
pub fn build_project(tree: &ProjectTree, config: &BuildConfig) -> BuildReport {
    pipeline::build_with(tree, config)
}

/// Writes the pages of a successful build below `destination`.
///
/// # Errors
///
/// Returns a [`SitepadError`] if:
///
/// - The build failed.
/// - The user could not be prompted for confirmation.
/// - A directory or file cannot be created or written to.
pub fn export_project(
    report: &BuildReport,
    destination: &Path,
    assume_yes: bool,
) -> Result<FinalTransactionState, SitepadError> {
    let destination = normalize_path(destination);

    Ok(export::export_site(report, &destination, assume_yes)?)
}
