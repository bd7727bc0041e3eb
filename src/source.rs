use crate::{
    errors::{FileOperation, IoError},
    seed::default_project,
    tree::{FileNode, ProjectTree, TreeError},
};
use miette::Diagnostic;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug, Diagnostic)]
pub enum SourceError {
    #[error("I/O error within source domain")]
    #[diagnostic(code(sitepad::source::io))]
    Io(#[from] IoError),

    #[error("project directory not found: '{}'", .path.display())]
    #[diagnostic(
        code(sitepad::source::not_a_directory),
        help("Point --project at the folder holding your site sources")
    )]
    NotADirectory { path: PathBuf },

    #[error("path is not valid unicode: '{}'", .path.display())]
    #[diagnostic(code(sitepad::source::invalid_unicode), help("Rename the file"))]
    InvalidUnicode { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Tree(#[from] TreeError),
}

/// Opens the project in `directory`, or the built-in default project.
pub fn open(directory: Option<&Path>) -> Result<ProjectTree, SourceError> {
    match directory {
        Some(directory) => load_project(directory),
        None => Ok(ProjectTree::from_forest(default_project())?),
    }
}

/// Reads a directory into a project tree. Identifiers and paths are the
/// slash-separated paths relative to `directory`; folders start expanded.
/// Files that are not UTF-8 text are left out.
pub fn load_project(directory: &Path) -> Result<ProjectTree, SourceError> {
    if !directory.is_dir() {
        return Err(SourceError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }

    let forest = read_children(directory, directory)?;

    log::debug!(
        "loaded {} top-level entries from {}",
        forest.len(),
        directory.display()
    );

    Ok(ProjectTree::from_forest(forest)?)
}

fn read_children(root: &Path, directory: &Path) -> Result<Vec<FileNode>, SourceError> {
    let mut nodes = Vec::new();

    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = error.path().unwrap_or(directory).to_path_buf();

                Err(IoError::new(FileOperation::Walk, path, error.into()))?
            }
        };

        let full_path = entry.path();
        let relative = relative_slash_path(root, full_path)?;
        let name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| SourceError::InvalidUnicode {
                path: full_path.to_path_buf(),
            })?
            .to_string();

        if entry.file_type().is_dir() {
            nodes.push(FileNode::Folder {
                id: relative.clone(),
                name,
                path: relative,
                children: read_children(root, full_path)?,
                expanded: true,
            });
        } else {
            let bytes = std::fs::read(full_path).map_err(|error| IoError::read(full_path, error))?;
            let Ok(content) = String::from_utf8(bytes) else {
                log::warn!("skipping non-text file {}", full_path.display());
                continue;
            };

            nodes.push(FileNode::File {
                id: relative.clone(),
                name,
                path: relative,
                content,
            });
        }
    }

    Ok(nodes)
}

fn relative_slash_path(root: &Path, path: &Path) -> Result<String, SourceError> {
    let relative = path.strip_prefix(root).unwrap_or(path);

    let mut segments = Vec::new();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            let segment = segment.to_str().ok_or_else(|| SourceError::InvalidUnicode {
                path: path.to_path_buf(),
            })?;
            segments.push(segment);
        }
    }

    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_a_directory_in_name_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::create_dir_all(dir.path().join("src/_includes")).expect("mkdir");
        fs::write(dir.path().join("src/index.md"), "---\ntitle: Home\n---\n# Home").expect("write");
        fs::write(dir.path().join("src/_includes/base.njk"), "{{ content | safe }}").expect("write");
        fs::write(dir.path().join("package.json"), "{}").expect("write");

        let tree = load_project(dir.path()).expect("project loads");

        let ids: Vec<&str> = tree.visible().into_iter().map(|(_, n)| n.id()).collect();
        assert_eq!(
            ids,
            vec![
                "package.json",
                "src",
                "src/_includes",
                "src/_includes/base.njk",
                "src/index.md",
            ]
        );
        assert_eq!(
            tree.find("src/index.md").map(|n| n.name()),
            Some("index.md")
        );
    }

    #[test]
    fn missing_directory_is_reported() {
        assert!(matches!(
            load_project(Path::new("/definitely/not/a/project")),
            Err(SourceError::NotADirectory { .. })
        ));
    }

    #[test]
    fn binary_files_are_skipped() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::create_dir_all(dir.path().join("src")).expect("mkdir");
        fs::write(dir.path().join("src/logo.png"), [0xff, 0xfe, 0x00]).expect("write");
        fs::write(dir.path().join("src/index.md"), "# Home").expect("write");

        let tree = load_project(dir.path()).expect("project loads");

        assert!(tree.find("src/logo.png").is_none());
        assert!(tree.find("src/index.md").is_some());
    }

    #[test]
    fn no_directory_opens_the_default_project() {
        let tree = open(None).expect("seed opens");

        assert!(tree.find("index-md").is_some());
    }
}
