use super::*;

#[test]
fn empty_document_uses_defaults() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(
        settings.sandbox.teardown_grace(),
        Duration::from_millis(DEFAULT_TEARDOWN_GRACE_MS)
    );
    assert!(settings.suggestions.enabled);
    assert_eq!(settings.suggestions.endpoint, DEFAULT_SUGGESTION_ENDPOINT);
    assert_eq!(settings.suggestions.kind, DEFAULT_SUGGESTION_KIND);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let settings: Settings = serde_json::from_str(
        r#"{ "sandbox": { "teardown_grace_ms": 50 }, "suggestions": { "enabled": false } }"#,
    )
    .unwrap();
    assert_eq!(settings.sandbox.teardown_grace(), Duration::from_millis(50));
    assert!(settings.sandbox.root.is_none());
    assert!(!settings.suggestions.enabled);
    assert_eq!(settings.suggestions.kind, DEFAULT_SUGGESTION_KIND);
}

#[test]
fn unset_root_is_not_serialized() {
    let json = serde_json::to_value(Settings::default()).unwrap();
    assert!(json["sandbox"].get("root").is_none());

    let custom = Settings {
        sandbox: SandboxSettings {
            root: Some(PathBuf::from("/tmp/boxes")),
            ..SandboxSettings::default()
        },
        ..Settings::default()
    };
    let json = serde_json::to_value(custom).unwrap();
    assert_eq!(json["sandbox"]["root"], "/tmp/boxes");
}
