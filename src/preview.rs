//! Terminal renderings of the project tree, the build log and the preview.
use crate::report::{BuildReport, OutputDocument};
use crate::tree::ProjectTree;
use crate::vfs::VirtualFS;
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

/// Preview frame size. Only changes how a page is framed, never its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Viewport {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}
impl Viewport {
    pub const NAMES: [&'static str; 3] = ["desktop", "tablet", "mobile"];

    /// `(width, height)` as CSS lengths.
    pub fn dimensions(&self) -> (&'static str, &'static str) {
        match self {
            Self::Desktop => ("100%", "100%"),
            Self::Tablet => ("768px", "1024px"),
            Self::Mobile => ("375px", "667px"),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }
}
impl FromStr for Viewport {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "desktop" => Ok(Self::Desktop),
            "tablet" => Ok(Self::Tablet),
            "mobile" => Ok(Self::Mobile),
            other => Err(format!("unknown viewport: {}", other)),
        }
    }
}
impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// Build the directory tree from the VFS entries, returning the root node.
fn build_tree(vfs: &VirtualFS, destination: &Path) -> Rc<RefCell<TreeNode>> {
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let root = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    // full path to node
    let mut lookup: HashMap<String, Rc<RefCell<TreeNode>>> = HashMap::new();
    lookup.insert(destination.to_string_lossy().to_string(), Rc::clone(&root));

    for entry in &vfs.entries {
        let full_path = destination.join(&entry.destination);
        let full_str = full_path.to_string_lossy().to_string();

        let Some(parent_path) = full_path.parent() else {
            continue;
        };
        let parent_str = parent_path.to_string_lossy().to_string();

        let Some(parent_node) = lookup.get(&parent_str).map(Rc::clone) else {
            log::debug!(
                "parent: {}, not found for path: {}",
                parent_str,
                entry.destination.display()
            );
            continue;
        };

        let child_name = full_path
            .file_name()
            .map(|os| os.to_string_lossy().to_string())
            .unwrap_or_else(|| full_str.clone());

        let new_child = Rc::new(RefCell::new(TreeNode::new(child_name, entry.is_file)));

        parent_node
            .borrow_mut()
            .children
            .push(Rc::clone(&new_child));

        lookup.insert(full_str, new_child);
    }

    root
}

fn render_tree(node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool, out: &mut String) {
    let node_borrow = node.borrow();

    let connector = if is_last {
        "└── ".yellow()
    } else {
        "├── ".yellow()
    };
    let name = if node_borrow.is_file {
        node_borrow.name.green()
    } else {
        node_borrow.name.blue()
    };
    out.push_str(&format!("{}{}{}\n", prefix.yellow(), connector, name));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        render_tree(child, &child_prefix, i == len - 1, out);
    }
}

/// Staged export as an ASCII tree rooted at `destination`.
pub fn render_vfs(vfs: &VirtualFS, destination: &Path) -> String {
    let mut out = String::new();
    render_tree(&build_tree(vfs, destination), "", true, &mut out);
    out
}

pub fn preview_as_tree(vfs: &VirtualFS, destination: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    println!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    print!("{}", render_vfs(vfs, destination));

    println!("\n{}\n", "└─".bold().bright_blue());
}

/// Project tree as a file-tree widget shows it: collapsed folders are marked
/// and their contents hidden.
pub fn render_project_tree(tree: &ProjectTree) -> String {
    let mut out = String::new();

    for (depth, node) in tree.visible() {
        let indent = "  ".repeat(depth);
        let line = match node.is_expanded() {
            Some(true) => format!("{}▾ {}", indent, node.name().blue()),
            Some(false) => format!("{}▸ {}", indent, node.name().blue()),
            None => format!("{}  {}", indent, node.name().green()),
        };
        out.push_str(&line);
        out.push_str(&format!("  {}\n", format!("[{}]", node.id()).dimmed()));
    }

    out
}

pub fn print_project_tree(tree: &ProjectTree) {
    print!("{}", render_project_tree(tree));
}

/// The build log: the summary on success, the error message otherwise.
pub fn render_build_log(report: &BuildReport) -> String {
    if report.success {
        report.message.green().to_string()
    } else {
        report.message.red().to_string()
    }
}

pub fn print_build_log(report: &BuildReport) {
    println!("{}", render_build_log(report));
}

/// Header line plus the page markup, framed for `viewport`.
pub fn render_page(document: &OutputDocument, viewport: Viewport) -> String {
    let (width, height) = viewport.dimensions();
    let page = document
        .output_path
        .split_once('/')
        .map_or(document.output_path.as_str(), |(_, rest)| rest);

    format!(
        "{} {} ({} {} × {})\n{}",
        "Previewing".bold().bright_blue(),
        page,
        viewport,
        width,
        height,
        document.content
    )
}
