use super::*;
use crate::kernel::services::adapters::{FsOp, MemorySandboxRuntime};
use crate::kernel::{Action, Effect, ExplorerState, Store};
use crate::models::NodeId;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

fn bridge(runtime: &MemorySandboxRuntime) -> SyncBridge {
    SyncBridge::new(SandboxLifecycle::with_grace(
        Arc::new(runtime.clone()),
        Duration::from_millis(500),
        Handle::current(),
    ))
}

fn nested_tree() -> TreeNode {
    TreeNode::root(
        "demo",
        vec![
            TreeNode::file("package.json", "{}"),
            TreeNode::folder(
                "src",
                vec![
                    TreeNode::file("index.js", "import './util/math'"),
                    TreeNode::folder(
                        "util",
                        vec![TreeNode::folder(
                            "deep",
                            vec![TreeNode::file("math.js", "1 + 1")],
                        )],
                    ),
                ],
            ),
        ],
    )
}

#[tokio::test]
async fn write_tree_places_every_file_at_its_path() {
    let runtime = MemorySandboxRuntime::new();
    let bridge = bridge(&runtime);

    let report = bridge.write_tree(&nested_tree()).await.unwrap();
    assert!(report.is_complete());
    assert_eq!(
        report.written,
        vec!["package.json", "src/index.js", "src/util/deep/math.js"]
    );

    let sandbox = runtime.last_booted().unwrap();
    assert_eq!(sandbox.read_file("package.json").as_deref(), Some("{}"));
    assert_eq!(
        sandbox.read_file("src/util/deep/math.js").as_deref(),
        Some("1 + 1")
    );
}

#[tokio::test]
async fn directories_are_created_before_their_files() {
    let runtime = MemorySandboxRuntime::new();
    let bridge = bridge(&runtime);
    bridge.write_tree(&nested_tree()).await.unwrap();

    let ops = runtime.last_booted().unwrap().ops();
    for (index, op) in ops.iter().enumerate() {
        let FsOp::Write(path) = op else { continue };
        let (Some(dir), _) = split_parent(path) else {
            continue;
        };
        assert!(
            ops[..index].contains(&FsOp::Mkdir(dir.to_string())),
            "{dir} created after {path}"
        );
    }
}

#[tokio::test]
async fn one_failing_file_does_not_abort_the_tree() {
    let runtime = MemorySandboxRuntime::new().with_failing_prefixes(vec!["src/index".to_string()]);
    let bridge = bridge(&runtime);

    let report = bridge.write_tree(&nested_tree()).await.unwrap();
    assert_eq!(report.written, vec!["package.json", "src/util/deep/math.js"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path(), Some("src/index.js"));
    assert!(!report.is_complete());
}

#[tokio::test]
async fn write_error_carries_offending_path() {
    let runtime = MemorySandboxRuntime::new().with_failing_prefixes(vec!["locked/".to_string()]);
    let bridge = bridge(&runtime);

    let err = bridge.write_file("locked/a.txt", "x").await.unwrap_err();
    assert_eq!(err.path(), Some("locked/a.txt"));
    assert!(err.to_string().contains("locked/a.txt"));
    assert!(matches!(
        err,
        SyncError::Write {
            source: SandboxFsError::Io(_),
            ..
        }
    ));
}

#[tokio::test]
async fn boot_failure_is_reported_as_unavailable() {
    let runtime = MemorySandboxRuntime::new();
    runtime.fail_next_boots(2);
    let bridge = bridge(&runtime);

    let err = bridge.write_file("a.txt", "x").await.unwrap_err();
    assert!(matches!(err, SyncError::Unavailable(SandboxError::Boot { .. })));
    assert_eq!(err.path(), None);
    assert!(bridge.write_tree(&nested_tree()).await.is_err());

    bridge.write_file("a.txt", "x").await.unwrap();
    assert_eq!(runtime.boot_count(), 3);
}

#[tokio::test]
async fn write_file_normalizes_and_overwrites() {
    let runtime = MemorySandboxRuntime::new();
    let bridge = bridge(&runtime);

    bridge.write_file("./src//app.js", "v1").await.unwrap();
    bridge.write_file("src/app.js", "v2").await.unwrap();

    let sandbox = runtime.last_booted().unwrap();
    assert_eq!(sandbox.read_file("src/app.js").as_deref(), Some("v2"));
    assert_eq!(sandbox.file_paths(), vec!["src/app.js".to_string()]);
}

#[tokio::test]
async fn edit_sync_and_save_round_trip() {
    let runtime = MemorySandboxRuntime::new();
    let bridge = bridge(&runtime);
    let tree = TreeNode::root(
        "demo",
        vec![TreeNode::folder("src", vec![TreeNode::file("index.js", "a")])],
    );

    let mut store = Store::new(ExplorerState::new("demo"));
    let mut effects = store.dispatch(Action::SetTree(Some(tree.clone()))).effects;
    let Some(Effect::SyncTree(synced)) = effects.pop() else {
        panic!("expected a tree sync");
    };
    bridge.write_tree(&synced).await.unwrap();
    let sandbox = runtime.last_booted().unwrap();
    assert_eq!(sandbox.read_file("src/index.js").as_deref(), Some("a"));

    let file = tree.find_file("src/index.js").cloned().unwrap();
    store.dispatch(Action::OpenFile(file));
    let mut effects = store
        .dispatch(Action::UpdateActiveContent("b".to_string()))
        .effects;
    assert!(store.state().active_file().unwrap().has_unsaved_changes);

    let Some(Effect::SyncFile { path, content }) = effects.pop() else {
        panic!("expected a file sync");
    };
    bridge.write_file(&path, &content).await.unwrap();
    assert_eq!(sandbox.read_file("src/index.js").as_deref(), Some("b"));

    store.dispatch(Action::MarkSaved(NodeId::for_path(&path)));
    let saved = store.state().active_file().unwrap();
    assert!(!saved.has_unsaved_changes);
    assert_eq!(saved.original_content, "b");
}
