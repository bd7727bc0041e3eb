use crate::report::BuildReport;
use std::{collections::BTreeSet, path::PathBuf};

/// Represents a virtual file or directory entry staged in memory before it is written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEntry {
    /// Destination relative to the export root.
    pub destination: PathBuf,
    /// Contents to be written if the entry represents a file.
    pub content: Option<String>,
    /// Indicates whether this entry is a file (`true`) or a directory (`false`).
    pub is_file: bool,
}
/// Represents a virtual file system composed of multiple [`VirtualEntry`] values.
///
/// Directories come first, parents before children, followed by the files in
/// build order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualFS {
    pub entries: Vec<VirtualEntry>,
}
impl VirtualFS {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Stages every page of `report`, plus each directory leading to it.
    pub fn from_report(report: &BuildReport) -> Self {
        let mut directories = BTreeSet::new();
        let mut files = Vec::new();

        for document in &report.documents {
            let destination: PathBuf = document.output_path.split('/').collect();

            for ancestor in destination.ancestors().skip(1) {
                if !ancestor.as_os_str().is_empty() {
                    directories.insert(ancestor.to_path_buf());
                }
            }

            files.push(VirtualEntry {
                destination,
                content: Some(document.content.clone()),
                is_file: true,
            });
        }

        let mut vfs = Self::new();
        vfs.entries.extend(directories.into_iter().map(|destination| VirtualEntry {
            destination,
            content: None,
            is_file: false,
        }));
        vfs.entries.extend(files);
        vfs
    }

    pub fn files(&self) -> impl Iterator<Item = &VirtualEntry> + '_ {
        self.entries.iter().filter(|e| e.is_file)
    }

    pub fn directories(&self) -> impl Iterator<Item = &VirtualEntry> + '_ {
        self.entries.iter().filter(|e| !e.is_file)
    }
}
