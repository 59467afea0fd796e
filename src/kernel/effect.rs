use crate::models::TreeNode;

/// IO requested by the store; executed by the session runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SyncTree(TreeNode),
    SyncFile { path: String, content: String },
}
