//! Reducer that applies actions to the explorer state.

use super::{Action, Effect, ExplorerState};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

/// Sole owner of [`ExplorerState`]; every mutation goes through `dispatch`.
pub struct Store {
    state: ExplorerState,
}

impl Store {
    pub fn new(state: ExplorerState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let result = match action {
            Action::SetProjectId(id) => DispatchResult::changed(self.state.set_project_id(id)),
            Action::SetTree(tree) => {
                if let Some(tree) = &tree {
                    let duplicates = tree.duplicate_paths();
                    if !duplicates.is_empty() {
                        tracing::warn!(?duplicates, "project tree contains duplicate paths");
                    }
                }
                let state_changed = self.state.set_tree(tree.clone());
                DispatchResult {
                    effects: match tree {
                        Some(tree) if state_changed => vec![Effect::SyncTree(tree)],
                        _ => Vec::new(),
                    },
                    state_changed,
                }
            }
            Action::OpenFile(file) => DispatchResult::changed(self.state.open_file(&file)),
            Action::SetActiveFile(id) => DispatchResult::changed(self.state.set_active_file(&id)),
            Action::UpdateActiveContent(text) | Action::SetEditorContent(text) => {
                match self.state.update_active_content(text) {
                    Some(path) => DispatchResult {
                        effects: vec![Effect::SyncFile {
                            path,
                            content: self.state.editor_content().to_string(),
                        }],
                        state_changed: true,
                    },
                    None => DispatchResult::changed(false),
                }
            }
            Action::CloseFile(id) => DispatchResult::changed(self.state.close_file(&id)),
            Action::CloseAll => DispatchResult::changed(self.state.close_all()),
            Action::MarkSaved(id) => DispatchResult::changed(self.state.mark_saved(&id)),
        };

        debug_assert!(
            self.state.invariants_hold(),
            "explorer state invariants violated"
        );
        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
