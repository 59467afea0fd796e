//! Data models: project tree, node ids and the persisted template document.

pub mod language;
pub mod node_id;
pub mod project_tree;
pub mod template;

pub use language::{extension_of, language_for_extension, language_for_path, PLAIN_TEXT};
pub use node_id::{id_for, normalize_path, split_parent, NodeId};
pub use project_tree::{FileNode, Files, FolderNode, TreeNode};
pub use template::{TemplateFile, TemplateFolder, TemplateItem};
