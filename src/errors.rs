//! Error types shared by the on-disk edges of the crate (project loading,
//! configuration files, site export). The build pipeline itself never
//! touches the file system and reports through [`crate::report::BuildReport`].
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
    #[error("walking a directory")]
    Walk,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{}'", .path.display())]
#[diagnostic(
    code(sitepad::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }

    pub fn read(path: &Path, error: std::io::Error) -> Self {
        Self::new(FileOperation::Read, path.to_path_buf(), error)
    }

    pub fn write(path: &Path, error: std::io::Error) -> Self {
        Self::new(FileOperation::Write, path.to_path_buf(), error)
    }

    pub fn mkdir(path: &Path, error: std::io::Error) -> Self {
        Self::new(FileOperation::Mkdir, path.to_path_buf(), error)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum FileFormat {
    #[error("toml")]
    Toml,
}
#[derive(Debug, Error, Diagnostic)]
#[error("Parsing error: {file_format} on '{}'", .path.display())]
#[diagnostic(code(sitepad::parse), help("Review the build configuration file"))]
pub struct ParseError {
    pub file_format: FileFormat,
    pub path: PathBuf,
    #[source]
    pub source: toml::de::Error,
}
impl ParseError {
    pub fn toml(path: &Path, error: toml::de::Error) -> Self {
        Self {
            file_format: FileFormat::Toml,
            path: path.to_path_buf(),
            source: error,
        }
    }
}
