use crate::errors::{IoError, ParseError};
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(sitepad::config::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Names and locations the build pipeline works with.
///
/// Every field has a default, so an empty file (or no file) yields the stock
/// layout: pages under `src/`, output under `_site/`, layout `base.njk`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Leading directory stripped from page paths.
    pub input_dir: String,
    /// Directory every output path is placed under.
    pub output_dir: String,
    /// Name identifying the layout file.
    pub layout: String,
    /// Extension (without the dot) of page sources.
    pub markdown_extension: String,
    /// Page whose output folds to `<output_dir>/index.html`.
    pub root_document: String,
}
impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: "src".to_string(),
            output_dir: "_site".to_string(),
            layout: "base.njk".to_string(),
            markdown_extension: "md".to_string(),
            root_document: "index".to_string(),
        }
    }
}
impl BuildConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|error| IoError::read(path, error))?;

        let parsed: BuildConfig =
            toml::from_str(&content).map_err(|error| ParseError::toml(path, error))?;

        log::debug!("loaded build config from {}: {:?}", path.display(), parsed);

        Ok(parsed)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
