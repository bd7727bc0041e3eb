//! Writing a finished build to disk.
use crate::{
    errors::IoError,
    preview::preview_as_tree,
    prompt::{apply_changes, PromptError},
    report::BuildReport,
    transactions::{Active, FinalTransactionState, RollbackOperation, Transaction},
    vfs::VirtualFS,
};
use colored::Colorize;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("I/O error within export domain")]
    #[diagnostic(code(sitepad::export::io))]
    Io(#[from] IoError),

    #[error("Error occurred trying to prompt user")]
    #[diagnostic(code(sitepad::export::prompt))]
    Prompt(#[from] PromptError),

    #[error("nothing to export, the build failed: {message}")]
    #[diagnostic(
        code(sitepad::export::failed_build),
        help("Fix the build errors shown in the build log first")
    )]
    FailedBuild { message: String },
}

/// Previews the pages of `report` under `destination`, asks for confirmation
/// unless `assume_yes`, and writes them. A write failure undoes everything the
/// export created.
pub fn export_site(
    report: &BuildReport,
    destination: &Path,
    assume_yes: bool,
) -> Result<FinalTransactionState, ExportError> {
    if !report.success {
        return Err(ExportError::FailedBuild {
            message: report.message.clone(),
        });
    }

    let vfs = VirtualFS::from_report(report);

    preview_as_tree(&vfs, destination);

    let mut trx = Transaction::<Active>::new();

    if assume_yes || apply_changes()? {
        apply_vfs(&vfs, destination, &mut trx)?;

        Ok(FinalTransactionState::Committed(trx.commit()))
    } else {
        Ok(FinalTransactionState::Canceled(trx.cancel()))
    }
}

/// Applies directory and file creation operations from a [`VirtualFS`].
fn apply_vfs(
    vfs: &VirtualFS,
    destination_root: &Path,
    trx: &mut Transaction<Active>,
) -> Result<(), ExportError> {
    create_directory(trx, destination_root)?;

    for entry in vfs.directories() {
        create_directory(trx, &destination_root.join(&entry.destination))?;
    }

    for entry in vfs.files() {
        let final_path = destination_root.join(&entry.destination);
        if let Some(parent) = final_path.parent() {
            create_directory(trx, parent)?;
        }

        write_file(trx, &final_path, entry.content.as_deref().unwrap_or_default())?;
    }

    Ok(())
}

/// Creates `path` and any missing parents, recording only the directories
/// that did not exist before.
fn create_directory(trx: &mut Transaction<Active>, path: &Path) -> Result<(), ExportError> {
    let missing: Vec<PathBuf> = path
        .ancestors()
        .take_while(|ancestor| !ancestor.as_os_str().is_empty() && !ancestor.exists())
        .map(Path::to_path_buf)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    std::fs::create_dir_all(path).map_err(|error| IoError::mkdir(path, error))?;

    for created in missing.into_iter().rev() {
        trx.add_operation(RollbackOperation::RemoveDir(created));
    }

    Ok(())
}

fn write_file(
    trx: &mut Transaction<Active>,
    path: &Path,
    contents: &str,
) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|error| IoError::write(path, error))?;

    println!("{} {}", "create".green(), path.display());

    trx.add_operation(RollbackOperation::RemoveFile(path.to_path_buf()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pipeline::build, seed::default_project, tree::ProjectTree};
    use std::fs;

    fn seed_report() -> BuildReport {
        build(&ProjectTree::from_forest(default_project()).expect("seed project is valid"))
    }

    #[test]
    fn writes_every_page() {
        let root = tempfile::tempdir().expect("temp dir");
        let destination = root.path().join("out");

        let state = export_site(&seed_report(), &destination, true).expect("export succeeds");

        assert!(state.is_committed());
        let index = fs::read_to_string(destination.join("_site/index.html")).expect("index");
        assert!(index.contains("<h1>Welcome to Your 11ty Site!</h1>"));
        assert!(destination.join("_site/about/index.html").is_file());
    }

    #[test]
    fn failed_builds_are_not_exported() {
        let root = tempfile::tempdir().expect("temp dir");
        let report = BuildReport::failed(&"boom");

        assert!(matches!(
            export_site(&report, root.path(), true),
            Err(ExportError::FailedBuild { .. })
        ));
    }

    #[test]
    fn failed_writes_roll_back_created_directories() {
        let root = tempfile::tempdir().expect("temp dir");
        let destination = root.path().join("out");
        let mut vfs = VirtualFS::from_report(&seed_report());
        // a directory standing where a file must go makes the write fail
        let blocker = vfs.files().nth(1).map(|e| e.destination.clone()).expect("two pages");
        fs::create_dir_all(destination.join(&blocker)).expect("mkdir blocker");
        vfs.entries.retain(|e| e.is_file);

        let result = {
            let mut trx = Transaction::<Active>::new();
            apply_vfs(&vfs, &destination, &mut trx)
        };

        assert!(matches!(result, Err(ExportError::Io(_))));
        assert!(!destination.join("_site/index.html").exists());
        assert!(destination.join(&blocker).is_dir());
    }

    #[test]
    fn existing_directories_are_not_recorded() {
        let root = tempfile::tempdir().expect("temp dir");
        let mut trx = Transaction::<Active>::new();

        create_directory(&mut trx, root.path()).expect("exists already");
        create_directory(&mut trx, &root.path().join("a/b")).expect("creates");

        assert_eq!(
            trx.operations(),
            &[
                RollbackOperation::RemoveDir(root.path().join("a")),
                RollbackOperation::RemoveDir(root.path().join("a/b")),
            ]
        );
        drop(trx);
        assert!(root.path().exists());
        assert!(!root.path().join("a").exists());
    }
}
