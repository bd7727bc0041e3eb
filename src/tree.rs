//! Project tree model.
//!
//! The project is an ordered forest of files and folders. It is described with
//! the recursive [`FileNode`] enum and stored in a [`ProjectTree`], an arena
//! keyed by node identifier where parents and children refer to each other by
//! arena index. Editing a file or toggling a folder touches a single entry.
use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum TreeError {
    #[error("duplicate node identifier: {id}")]
    #[diagnostic(
        code(sitepad::tree::duplicate_id),
        help("Every file and folder in a project needs its own identifier")
    )]
    DuplicateId { id: String },

    #[error("node '{id}' has path '{found}' but its position implies '{expected}'")]
    #[diagnostic(code(sitepad::tree::path_mismatch))]
    PathMismatch {
        id: String,
        expected: String,
        found: String,
    },
}

/// A file or folder, as supplied by the seed project or a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNode {
    File {
        id: String,
        name: String,
        path: String,
        content: String,
    },
    Folder {
        id: String,
        name: String,
        path: String,
        children: Vec<FileNode>,
        expanded: bool,
    },
}
impl FileNode {
    pub fn file(id: &str, name: &str, path: &str, content: &str) -> Self {
        Self::File {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    pub fn folder(id: &str, name: &str, path: &str, children: Vec<FileNode>) -> Self {
        Self::Folder {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            children,
            expanded: true,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::File { id, .. } | Self::Folder { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Folder { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Folder { path, .. } => path,
        }
    }
}

/// What distinguishes a stored file from a stored folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File { content: String },
    Folder { children: Vec<usize>, expanded: bool },
}

/// A node stored in the [`ProjectTree`] arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: String,
    name: String,
    path: String,
    parent: Option<usize>,
    kind: NodeKind,
}
impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// File content, `None` for folders.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Expand flag, `None` for files.
    pub fn is_expanded(&self) -> Option<bool> {
        match &self.kind {
            NodeKind::Folder { expanded, .. } => Some(*expanded),
            NodeKind::File { .. } => None,
        }
    }
}

/// A flattened `(path, content)` pair handed to the build pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}
impl SourceFile {
    pub fn new(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectTree {
    nodes: IndexMap<String, Node>,
    roots: Vec<usize>,
}
impl ProjectTree {
    /// Builds the arena from a forest, checking identifier uniqueness and that
    /// every path matches the node's position.
    pub fn from_forest(forest: Vec<FileNode>) -> Result<Self, TreeError> {
        let mut tree = Self::default();

        for node in forest {
            let index = tree.insert(node, None)?;
            tree.roots.push(index);
        }

        log::debug!("project tree built with {} nodes", tree.nodes.len());

        Ok(tree)
    }

    fn insert(&mut self, node: FileNode, parent: Option<usize>) -> Result<usize, TreeError> {
        let expected = match parent {
            Some(index) => format!("{}/{}", self.nodes[index].path, node.name()),
            None => node.name().to_string(),
        };
        if node.path() != expected {
            return Err(TreeError::PathMismatch {
                id: node.id().to_string(),
                expected,
                found: node.path().to_string(),
            });
        }
        if self.nodes.contains_key(node.id()) {
            return Err(TreeError::DuplicateId {
                id: node.id().to_string(),
            });
        }

        match node {
            FileNode::File {
                id,
                name,
                path,
                content,
            } => {
                let (index, _) = self.nodes.insert_full(
                    id.clone(),
                    Node {
                        id,
                        name,
                        path,
                        parent,
                        kind: NodeKind::File { content },
                    },
                );
                Ok(index)
            }
            FileNode::Folder {
                id,
                name,
                path,
                children,
                expanded,
            } => {
                let (index, _) = self.nodes.insert_full(
                    id.clone(),
                    Node {
                        id,
                        name,
                        path,
                        parent,
                        kind: NodeKind::Folder {
                            children: Vec::new(),
                            expanded,
                        },
                    },
                );

                let mut child_indices = Vec::with_capacity(children.len());
                for child in children {
                    child_indices.push(self.insert(child, Some(index))?);
                }
                if let NodeKind::Folder { children, .. } = &mut self.nodes[index].kind {
                    *children = child_indices;
                }

                Ok(index)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn parent(&self, id: &str) -> Option<&Node> {
        let parent = self.nodes.get(id)?.parent?;
        self.nodes.get_index(parent).map(|(_, node)| node)
    }

    pub fn roots(&self) -> impl Iterator<Item = &Node> + '_ {
        self.roots.iter().map(move |&index| &self.nodes[index])
    }

    pub fn children(&self, id: &str) -> Vec<&Node> {
        match self.nodes.get(id).map(|node| &node.kind) {
            Some(NodeKind::Folder { children, .. }) => {
                children.iter().map(|&index| &self.nodes[index]).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Replaces the content of file `id`. Returns `false` and leaves the tree
    /// untouched when `id` is absent or names a folder.
    pub fn set_content(&mut self, id: &str, content: &str) -> bool {
        match self.nodes.get_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::File { content: current }) => {
                *current = content.to_string();
                log::debug!("content of '{}' replaced", id);
                true
            }
            _ => false,
        }
    }

    pub fn with_content(mut self, id: &str, content: &str) -> Self {
        self.set_content(id, content);
        self
    }

    /// Flips the expand flag of folder `id`. Files and absent ids are ignored.
    pub fn toggle_folder(&mut self, id: &str) -> bool {
        match self.nodes.get_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Folder { expanded, .. }) => {
                *expanded = !*expanded;
                true
            }
            _ => false,
        }
    }

    pub fn with_folder_toggled(mut self, id: &str) -> Self {
        self.toggle_folder(id);
        self
    }

    /// Depth-first `(path, content)` pairs for every file with content, in
    /// forest order.
    pub fn flatten(&self) -> Vec<SourceFile> {
        let mut files = Vec::new();
        for &root in &self.roots {
            self.flatten_into(root, "", &mut files);
        }
        files
    }

    fn flatten_into(&self, index: usize, base: &str, files: &mut Vec<SourceFile>) {
        let node = &self.nodes[index];
        let full_path = if base.is_empty() {
            node.name.clone()
        } else {
            format!("{}/{}", base, node.name)
        };

        match &node.kind {
            NodeKind::File { content } if !content.is_empty() => files.push(SourceFile {
                path: full_path,
                content: content.clone(),
            }),
            NodeKind::File { .. } => {}
            NodeKind::Folder { children, .. } => {
                for &child in children {
                    self.flatten_into(child, &full_path, files);
                }
            }
        }
    }

    /// Nodes as a tree widget would list them: depth-first with the
    /// descendants of collapsed folders left out.
    pub fn visible(&self) -> Vec<(usize, &Node)> {
        let mut rows = Vec::new();
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&i| (0, i)).collect();

        while let Some((depth, index)) = stack.pop() {
            let node = &self.nodes[index];
            rows.push((depth, node));

            if let NodeKind::Folder {
                children,
                expanded: true,
            } = &node.kind
            {
                stack.extend(children.iter().rev().map(|&child| (depth + 1, child)));
            }
        }

        rows
    }

    pub fn to_forest(&self) -> Vec<FileNode> {
        self.roots.iter().map(|&index| self.to_node(index)).collect()
    }

    fn to_node(&self, index: usize) -> FileNode {
        let node = &self.nodes[index];
        match &node.kind {
            NodeKind::File { content } => FileNode::File {
                id: node.id.clone(),
                name: node.name.clone(),
                path: node.path.clone(),
                content: content.clone(),
            },
            NodeKind::Folder { children, expanded } => FileNode::Folder {
                id: node.id.clone(),
                name: node.name.clone(),
                path: node.path.clone(),
                children: children.iter().map(|&child| self.to_node(child)).collect(),
                expanded: *expanded,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_project;

    fn seed() -> ProjectTree {
        ProjectTree::from_forest(default_project()).expect("seed project is valid")
    }

    #[test]
    fn find_locates_nested_nodes() {
        let tree = seed();

        let layout = tree.find("base-njk").expect("layout exists");
        assert_eq!(layout.path(), "src/_includes/base.njk");
        assert_eq!(tree.parent("base-njk").map(Node::id), Some("includes"));
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn set_content_replaces_only_the_target() {
        let before = seed();
        let after = before.clone().with_content("about-md", "changed");

        assert_eq!(after.find("about-md").and_then(Node::content), Some("changed"));
        for node in before.roots().chain(before.children("src")) {
            if node.id() != "about-md" {
                assert_eq!(after.find(node.id()), Some(node));
            }
        }
        assert_eq!(
            after.find("base-njk").and_then(Node::content),
            before.find("base-njk").and_then(Node::content)
        );
    }

    #[test]
    fn absent_ids_leave_the_tree_unchanged() {
        let tree = seed();

        assert_eq!(tree.clone().with_content("nope", "x"), tree);
        assert_eq!(tree.clone().with_folder_toggled("nope"), tree);
    }

    #[test]
    fn folders_do_not_take_content() {
        let mut tree = seed();

        assert!(!tree.set_content("src", "text"));
        assert_eq!(tree.find("src").and_then(Node::content), None);
    }

    #[test]
    fn toggle_folder_flips_only_folders() {
        let mut tree = seed();

        assert!(tree.toggle_folder("includes"));
        assert_eq!(tree.find("includes").and_then(Node::is_expanded), Some(false));
        assert!(!tree.toggle_folder("index-md"));
        assert_eq!(tree.clone().with_folder_toggled("includes"), seed());
    }

    #[test]
    fn flatten_follows_forest_order() {
        let paths: Vec<String> = seed().flatten().into_iter().map(|f| f.path).collect();

        assert_eq!(
            paths,
            vec![
                "src/index.md",
                "src/about.md",
                "src/_includes/base.njk",
                ".eleventy.js",
                "package.json",
            ]
        );
    }

    #[test]
    fn flatten_skips_empty_files() {
        let tree = seed().with_content("package-json", "");

        assert!(tree.flatten().iter().all(|f| f.path != "package.json"));
    }

    #[test]
    fn collapsed_folders_hide_children_but_still_flatten() {
        let tree = seed().with_folder_toggled("src");

        let visible: Vec<&str> = tree.visible().into_iter().map(|(_, n)| n.id()).collect();
        assert_eq!(visible, vec!["src", "eleventy-js", "package-json"]);
        assert_eq!(tree.flatten().len(), 5);
    }

    #[test]
    fn visible_reports_depth() {
        let tree = seed();

        let depths: Vec<(usize, &str)> =
            tree.visible().into_iter().map(|(d, n)| (d, n.id())).collect();
        assert_eq!(depths[0], (0, "src"));
        assert_eq!(depths[3], (1, "includes"));
        assert_eq!(depths[4], (2, "base-njk"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let forest = vec![
            FileNode::file("a", "a.md", "a.md", "x"),
            FileNode::file("a", "b.md", "b.md", "y"),
        ];

        assert_eq!(
            ProjectTree::from_forest(forest),
            Err(TreeError::DuplicateId { id: "a".into() })
        );
    }

    #[test]
    fn inconsistent_paths_are_rejected() {
        let forest = vec![FileNode::folder(
            "src",
            "src",
            "src",
            vec![FileNode::file("a", "a.md", "a.md", "x")],
        )];

        assert_eq!(
            ProjectTree::from_forest(forest),
            Err(TreeError::PathMismatch {
                id: "a".into(),
                expected: "src/a.md".into(),
                found: "a.md".into(),
            })
        );
    }

    #[test]
    fn to_forest_round_trips_the_seed() {
        assert_eq!(seed().to_forest(), default_project());
    }
}
