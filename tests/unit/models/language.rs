use super::*;

#[test]
fn script_extensions_map_to_their_language() {
    assert_eq!(language_for_extension("jsx"), "javascript");
    assert_eq!(language_for_extension("mjs"), "javascript");
    assert_eq!(language_for_extension("TSX"), "typescript");
    assert_eq!(language_for_extension("yml"), "yaml");
    assert_eq!(language_for_extension("toml"), "ini");
    assert_eq!(language_for_extension("cs"), "csharp");
}

#[test]
fn unknown_or_missing_extension_is_plain_text() {
    assert_eq!(language_for_extension("zig"), PLAIN_TEXT);
    assert_eq!(language_for_extension(""), PLAIN_TEXT);
    assert_eq!(language_for_path("LICENSE"), PLAIN_TEXT);
    assert_eq!(language_for_path("notes."), PLAIN_TEXT);
}

#[test]
fn path_language_uses_the_last_segment() {
    assert_eq!(language_for_path("src/app.v1/index.ts"), "typescript");
    assert_eq!(language_for_path("docker/Dockerfile"), "dockerfile");
    assert_eq!(extension_of("src/.env"), "");
    assert_eq!(extension_of("a/b.test.js"), "js");
}
