//! Explorer state: the project tree plus the open editor tabs.

use crate::models::{id_for, language_for_path, FileNode, NodeId, TreeNode};

/// A file bound to an editor tab, carrying live and saved content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFile {
    pub id: NodeId,
    pub path: String,
    pub name: String,
    pub content: String,
    pub original_content: String,
    pub has_unsaved_changes: bool,
}

impl OpenFile {
    fn from_node(id: NodeId, file: &FileNode) -> Self {
        Self {
            id,
            path: file.path.clone(),
            name: file.name.clone(),
            content: file.content.clone(),
            original_content: file.content.clone(),
            has_unsaved_changes: false,
        }
    }

    pub fn language(&self) -> &'static str {
        language_for_path(&self.name)
    }

    fn set_content(&mut self, text: String) -> bool {
        if self.content == text {
            return false;
        }
        self.content = text;
        self.has_unsaved_changes = self.content != self.original_content;
        true
    }

    fn mark_saved(&mut self) -> bool {
        if !self.has_unsaved_changes {
            return false;
        }
        self.original_content = self.content.clone();
        self.has_unsaved_changes = false;
        true
    }
}

/// Explorer + open-tab state of one project session.
#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    project_id: String,
    tree: Option<TreeNode>,
    open_files: Vec<OpenFile>,
    active_file_id: Option<NodeId>,
    editor_content: String,
}

impl ExplorerState {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    pub fn open_files(&self) -> &[OpenFile] {
        &self.open_files
    }

    pub fn active_file_id(&self) -> Option<&NodeId> {
        self.active_file_id.as_ref()
    }

    pub fn editor_content(&self) -> &str {
        &self.editor_content
    }

    pub fn active_file(&self) -> Option<&OpenFile> {
        let id = self.active_file_id.as_ref()?;
        self.open_file_by_id(id)
    }

    pub fn open_file_by_id(&self, id: &NodeId) -> Option<&OpenFile> {
        self.open_files.iter().find(|f| &f.id == id)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.open_files.iter().any(|f| f.has_unsaved_changes)
    }

    pub fn dirty_files(&self) -> impl Iterator<Item = &OpenFile> {
        self.open_files.iter().filter(|f| f.has_unsaved_changes)
    }

    pub(super) fn set_project_id(&mut self, id: String) -> bool {
        if self.project_id == id {
            return false;
        }
        self.project_id = id;
        true
    }

    pub(super) fn set_tree(&mut self, tree: Option<TreeNode>) -> bool {
        if self.tree == tree {
            return false;
        }
        self.tree = tree;
        true
    }

    pub(super) fn open_file(&mut self, file: &FileNode) -> bool {
        let id = id_for(file);

        if let Some(existing) = self.open_files.iter().find(|f| f.id == id) {
            // Reopening keeps the live content; pending edits are not reset.
            let content = existing.content.clone();
            return self.activate(id, content);
        }

        let open = OpenFile::from_node(id.clone(), file);
        let content = open.content.clone();
        self.open_files.push(open);
        self.activate(id, content);
        true
    }

    pub(super) fn set_active_file(&mut self, id: &NodeId) -> bool {
        let Some(content) = self.open_file_by_id(id).map(|f| f.content.clone()) else {
            return false;
        };
        self.activate(id.clone(), content)
    }

    /// Returns the edited file's path when its content actually changed.
    pub(super) fn update_active_content(&mut self, text: String) -> Option<String> {
        let Some(active_id) = self.active_file_id.clone() else {
            tracing::debug!("content update without an active file ignored");
            return None;
        };
        let file = self.open_files.iter_mut().find(|f| f.id == active_id)?;
        if !file.set_content(text) {
            return None;
        }
        let path = file.path.clone();
        self.editor_content = file.content.clone();
        Some(path)
    }

    pub(super) fn close_file(&mut self, id: &NodeId) -> bool {
        let Some(index) = self.open_files.iter().position(|f| &f.id == id) else {
            return false;
        };
        let closed = self.open_files.remove(index);
        if closed.has_unsaved_changes {
            tracing::debug!(path = %closed.path, "closed file with unsaved changes");
        }

        if self.active_file_id.as_ref() == Some(id) {
            match self.open_files.last() {
                Some(next) => {
                    self.active_file_id = Some(next.id.clone());
                    self.editor_content = next.content.clone();
                }
                None => {
                    self.active_file_id = None;
                    self.editor_content.clear();
                }
            }
        }
        true
    }

    pub(super) fn close_all(&mut self) -> bool {
        let changed = !self.open_files.is_empty()
            || self.active_file_id.is_some()
            || !self.editor_content.is_empty();
        self.open_files.clear();
        self.active_file_id = None;
        self.editor_content.clear();
        changed
    }

    pub(super) fn mark_saved(&mut self, id: &NodeId) -> bool {
        self.open_files
            .iter_mut()
            .find(|f| &f.id == id)
            .is_some_and(OpenFile::mark_saved)
    }

    fn activate(&mut self, id: NodeId, content: String) -> bool {
        let changed = self.active_file_id.as_ref() != Some(&id) || self.editor_content != content;
        self.active_file_id = Some(id);
        self.editor_content = content;
        changed
    }

    pub(crate) fn invariants_hold(&self) -> bool {
        let dirty_flags_match = self
            .open_files
            .iter()
            .all(|f| f.has_unsaved_changes == (f.content != f.original_content));
        let editor_mirrors_active = match &self.active_file_id {
            Some(id) => self
                .open_file_by_id(id)
                .is_some_and(|f| f.content == self.editor_content),
            None => self.editor_content.is_empty(),
        };
        dirty_flags_match && editor_mirrors_active
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
