use crate::kernel::services::ports::ContentChange;
use crate::models::{FileNode, NodeId, TreeNode};

#[derive(Debug, Clone)]
pub enum Action {
    SetProjectId(String),
    SetTree(Option<TreeNode>),
    OpenFile(FileNode),
    SetActiveFile(NodeId),
    UpdateActiveContent(String),
    /// Editor-binding alias of `UpdateActiveContent`.
    SetEditorContent(String),
    CloseFile(NodeId),
    CloseAll,
    MarkSaved(NodeId),
}

impl From<ContentChange> for Action {
    fn from(change: ContentChange) -> Self {
        Action::UpdateActiveContent(change.text)
    }
}
