use super::*;

#[test]
fn ids_are_path_qualified() {
    let a = FileNode::new("src/index.js", "");
    let b = FileNode::new("lib/index.js", "");
    assert_eq!(a.name, b.name);
    assert_ne!(id_for(&a), id_for(&b));
}

#[test]
fn id_is_stable_for_the_same_path() {
    let a = FileNode::new("src/index.js", "one");
    let b = FileNode::new("./src//index.js", "two");
    assert_eq!(id_for(&a), id_for(&b));
    assert_eq!(id_for(&a).as_str(), "src/index.js");
}

#[test]
fn normalize_path_strips_leading_and_dot_segments() {
    assert_eq!(normalize_path("/a/./b//c.txt"), "a/b/c.txt");
    assert_eq!(normalize_path("./index.js"), "index.js");
    assert_eq!(normalize_path(""), "");
}

#[test]
fn split_parent_separates_dir_and_leaf() {
    assert_eq!(split_parent("src/app/main.rs"), (Some("src/app"), "main.rs"));
    assert_eq!(split_parent("main.rs"), (None, "main.rs"));
    assert_eq!(split_parent("/main.rs"), (None, "main.rs"));
}

#[test]
fn node_id_serializes_as_plain_string() {
    let id = NodeId::for_path("src/a.ts");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"src/a.ts\"");
    assert_eq!(id.to_string(), "src/a.ts");
}
