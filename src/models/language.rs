//! Editor language ids derived from file extensions.

pub const PLAIN_TEXT: &str = "plaintext";

/// Maps a file extension (without the dot, any case) to an editor language id.
pub fn language_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "json" => "json",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" | "sass" => "scss",
        "less" => "less",
        "md" | "markdown" => "markdown",
        "xml" => "xml",
        "yaml" | "yml" => "yaml",
        "py" => "python",
        "java" => "java",
        "c" => "c",
        "cpp" => "cpp",
        "cs" => "csharp",
        "php" => "php",
        "rb" => "ruby",
        "go" => "go",
        "rs" => "rust",
        "sh" | "bash" => "shell",
        "sql" => "sql",
        "toml" | "ini" | "conf" => "ini",
        "dockerfile" => "dockerfile",
        _ => PLAIN_TEXT,
    }
}

/// Extension of the last path segment: the text after its final dot, if any.
pub fn extension_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext,
        _ => "",
    }
}

/// Language of a file path. A bare `Dockerfile` counts as `dockerfile`.
pub fn language_for_path(path: &str) -> &'static str {
    let name = path.rsplit('/').next().unwrap_or(path);
    if name.eq_ignore_ascii_case("dockerfile") {
        return "dockerfile";
    }
    language_for_extension(extension_of(path))
}

#[cfg(test)]
#[path = "../../tests/unit/models/language.rs"]
mod tests;
