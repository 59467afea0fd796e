//! Persisted project document shape and its conversion to [`TreeNode`].

use serde::{Deserialize, Serialize};

use super::project_tree::{FolderNode, TreeNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFolder {
    pub folder_name: String,
    #[serde(default)]
    pub items: Vec<TemplateItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFile {
    pub filename: String,
    #[serde(default)]
    pub file_extension: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateItem {
    File(TemplateFile),
    Folder(TemplateFolder),
}

impl TemplateFile {
    pub fn full_name(&self) -> String {
        if self.file_extension.is_empty() {
            self.filename.clone()
        } else {
            format!("{}.{}", self.filename, self.file_extension)
        }
    }

    fn from_name(name: &str, content: &str) -> Self {
        let (filename, file_extension) = match name.rsplit_once('.') {
            Some((stem, ext)) if !ext.is_empty() => (stem.to_string(), ext.to_string()),
            _ => (name.to_string(), String::new()),
        };
        Self {
            filename,
            file_extension,
            content: content.to_string(),
        }
    }
}

impl TemplateFolder {
    /// Converts the document into a project root with materialized paths.
    pub fn into_tree(self) -> TreeNode {
        TreeNode::root(self.folder_name, convert_items(self.items))
    }

    /// Inverse of [`TemplateFolder::into_tree`]; `None` when `tree` is a file.
    pub fn from_tree(tree: &TreeNode) -> Option<Self> {
        match tree {
            TreeNode::File(_) => None,
            TreeNode::Folder(folder) => Some(Self::from_folder(folder)),
        }
    }

    fn from_folder(folder: &FolderNode) -> Self {
        Self {
            folder_name: folder.name.clone(),
            items: folder
                .children
                .iter()
                .map(|child| match child {
                    TreeNode::File(file) => {
                        TemplateItem::File(TemplateFile::from_name(&file.name, &file.content))
                    }
                    TreeNode::Folder(sub) => TemplateItem::Folder(Self::from_folder(sub)),
                })
                .collect(),
        }
    }
}

fn convert_items(items: Vec<TemplateItem>) -> Vec<TreeNode> {
    items
        .into_iter()
        .map(|item| match item {
            TemplateItem::File(file) => TreeNode::file(file.full_name(), file.content),
            TemplateItem::Folder(folder) => {
                TreeNode::folder(folder.folder_name, convert_items(folder.items))
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/models/template.rs"]
mod tests;
