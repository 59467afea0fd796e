use super::*;

fn file(path: &str, content: &str) -> FileNode {
    FileNode::new(path, content)
}

#[test]
fn open_file_appends_and_activates() {
    let mut state = ExplorerState::new("p1");
    assert!(state.open_file(&file("src/a.js", "a")));
    assert!(state.open_file(&file("src/b.js", "b")));

    let ids: Vec<&str> = state.open_files().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["src/a.js", "src/b.js"]);
    assert_eq!(state.active_file_id().unwrap().as_str(), "src/b.js");
    assert_eq!(state.editor_content(), "b");
    assert!(state.invariants_hold());
}

#[test]
fn reopening_dirty_file_keeps_edits() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "original"));
    state.update_active_content("edited".to_string());
    state.open_file(&file("b.js", "b"));

    state.open_file(&file("a.js", "original"));
    let active = state.active_file().unwrap();
    assert_eq!(active.content, "edited");
    assert!(active.has_unsaved_changes);
    assert_eq!(state.editor_content(), "edited");
    assert_eq!(state.open_files().len(), 2);
}

#[test]
fn update_active_content_tracks_dirty_flag() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "x"));

    assert_eq!(
        state.update_active_content("y".to_string()).as_deref(),
        Some("a.js")
    );
    assert!(state.active_file().unwrap().has_unsaved_changes);

    state.update_active_content("x".to_string());
    assert!(!state.active_file().unwrap().has_unsaved_changes);
    assert!(!state.has_unsaved_changes());
    assert!(state.invariants_hold());
}

#[test]
fn update_without_active_file_is_ignored() {
    let mut state = ExplorerState::new("p1");
    assert!(state.update_active_content("text".to_string()).is_none());
    assert_eq!(state.editor_content(), "");
}

#[test]
fn unchanged_content_reports_no_update() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "same"));
    assert!(state.update_active_content("same".to_string()).is_none());
}

#[test]
fn closing_active_file_activates_tail() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "a"));
    state.open_file(&file("b.js", "b"));
    state.open_file(&file("c.js", "c"));
    state.set_active_file(&NodeId::for_path("a.js"));

    assert!(state.close_file(&NodeId::for_path("a.js")));
    assert_eq!(state.active_file_id().unwrap().as_str(), "c.js");
    assert_eq!(state.editor_content(), "c");
    assert!(state.invariants_hold());
}

#[test]
fn closing_inactive_file_keeps_selection() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "a"));
    state.open_file(&file("b.js", "b"));

    assert!(state.close_file(&NodeId::for_path("a.js")));
    assert_eq!(state.active_file_id().unwrap().as_str(), "b.js");
    assert_eq!(state.editor_content(), "b");
}

#[test]
fn closing_last_file_clears_editor() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "a"));
    state.update_active_content("dirty".to_string());

    assert!(state.close_file(&NodeId::for_path("a.js")));
    assert!(state.active_file_id().is_none());
    assert_eq!(state.editor_content(), "");
    assert!(state.open_files().is_empty());
}

#[test]
fn unknown_ids_are_noops() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "a"));
    let ghost = NodeId::for_path("ghost.js");

    assert!(!state.close_file(&ghost));
    assert!(!state.mark_saved(&ghost));
    assert!(!state.set_active_file(&ghost));
    assert_eq!(state.open_files().len(), 1);
}

#[test]
fn mark_saved_promotes_content_to_original() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "a"));
    state.update_active_content("b".to_string());

    let id = NodeId::for_path("a.js");
    assert!(state.mark_saved(&id));
    let saved = state.open_file_by_id(&id).unwrap();
    assert_eq!(saved.original_content, "b");
    assert!(!saved.has_unsaved_changes);
    assert!(!state.mark_saved(&id));
}

#[test]
fn close_all_resets_tabs() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "a"));
    state.open_file(&file("b.js", "b"));

    assert!(state.close_all());
    assert!(state.open_files().is_empty());
    assert!(state.active_file_id().is_none());
    assert_eq!(state.editor_content(), "");
    assert!(!state.close_all());
}

#[test]
fn set_tree_leaves_open_files_alone() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "a"));

    let tree = TreeNode::root("p", vec![TreeNode::file("other.js", "")]);
    assert!(state.set_tree(Some(tree.clone())));
    assert!(!state.set_tree(Some(tree)));
    assert_eq!(state.open_files().len(), 1);
    assert!(state.set_tree(None));
    assert!(state.tree().is_none());
}

#[test]
fn dirty_files_lists_only_modified_tabs() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("a.js", "a"));
    state.update_active_content("a2".to_string());
    state.open_file(&file("b.js", "b"));

    let dirty: Vec<&str> = state.dirty_files().map(|f| f.path.as_str()).collect();
    assert_eq!(dirty, vec!["a.js"]);
}

#[test]
fn open_file_exposes_editor_language() {
    let mut state = ExplorerState::new("p1");
    state.open_file(&file("styles/site.scss", ""));
    assert_eq!(state.active_file().unwrap().language(), "scss");
}
