use std::path::{Component, Path, PathBuf};

/// Resolves `.` and `..` lexically, without touching the file system.
pub fn normalize_path(source: &Path) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in source.components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // For "..", pop a named component; keep ".." once nothing is left to pop
            Component::ParentDir => match new_path.components().next_back() {
                Some(Component::Normal(_)) => {
                    new_path.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => new_path.push(".."),
            },

            // For normal components, push them
            other => new_path.push(other.as_os_str()),
        }
    }

    new_path
}

/// Editor language for a file name, by extension.
pub fn language_for(file_name: &str) -> &'static str {
    let extension = file_name.rsplit('.').next().unwrap_or_default();

    match extension {
        "js" => "javascript",
        "json" => "json",
        "md" => "markdown",
        "html" | "njk" => "html",
        "css" => "css",
        "scss" => "scss",
        "ts" => "typescript",
        "yaml" | "yml" => "yaml",
        _ => "plaintext",
    }
}
