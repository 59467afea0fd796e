//! Logical project tree: the user's files and folders, independent of any
//! runtime filesystem.

use rustc_hash::FxHashSet;

use super::language::{extension_of, language_for_path};
use super::node_id::normalize_path;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeNode {
    File(FileNode),
    Folder(FolderNode),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileNode {
    /// Slash-delimited path from the project root (root folder excluded).
    pub path: String,
    pub name: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderNode {
    pub name: String,
    pub children: Vec<TreeNode>,
}

impl FileNode {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = normalize_path(&path.into());
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            path,
            name,
            content: content.into(),
        }
    }

    pub fn extension(&self) -> &str {
        extension_of(&self.name)
    }

    /// Editor language id for this file.
    pub fn language(&self) -> &'static str {
        language_for_path(&self.name)
    }
}

impl TreeNode {
    /// A detached file; its path is fixed up once it is placed under a root.
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        TreeNode::File(FileNode {
            path: name.clone(),
            name,
            content: content.into(),
        })
    }

    pub fn folder(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode::Folder(FolderNode {
            name: name.into(),
            children,
        })
    }

    /// Builds a project root and materializes every descendant path from the
    /// folder structure.
    pub fn root(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        let mut root = Self::folder(name, children);
        root.materialize_paths();
        root
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::File(file) => &file.name,
            TreeNode::Folder(folder) => &folder.name,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, TreeNode::File(_))
    }

    /// Rewrites every file path as the concatenation of its ancestor folder
    /// names, treating `self` as the root.
    pub fn materialize_paths(&mut self) {
        match self {
            TreeNode::File(file) => file.path = normalize_path(&file.name),
            TreeNode::Folder(folder) => {
                for child in &mut folder.children {
                    assign_paths(child, "");
                }
            }
        }
    }

    /// Depth-first iteration over every file, in child order.
    pub fn files(&self) -> Files<'_> {
        Files { stack: vec![self] }
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    pub fn find_file(&self, path: &str) -> Option<&FileNode> {
        let path = normalize_path(path);
        self.files().find(|file| file.path == path)
    }

    /// Paths that occur more than once; empty for a well-formed tree.
    pub fn duplicate_paths(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut duplicates = Vec::new();
        for file in self.files() {
            if !seen.insert(file.path.as_str()) && !duplicates.contains(&file.path) {
                duplicates.push(file.path.clone());
            }
        }
        duplicates
    }
}

fn assign_paths(node: &mut TreeNode, prefix: &str) {
    match node {
        TreeNode::File(file) => {
            file.path = normalize_path(&format!("{prefix}/{}", file.name));
        }
        TreeNode::Folder(folder) => {
            let prefix = normalize_path(&format!("{prefix}/{}", folder.name));
            for child in &mut folder.children {
                assign_paths(child, &prefix);
            }
        }
    }
}

pub struct Files<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Files<'a> {
    type Item = &'a FileNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                TreeNode::File(file) => return Some(file),
                TreeNode::Folder(folder) => self.stack.extend(folder.children.iter().rev()),
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/project_tree.rs"]
mod tests;
