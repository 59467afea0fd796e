//! Line-based style checker for JavaScript and TypeScript.
//!
//! Rules: strings use single quotes (error), statements end with a semicolon
//! (error), declared variables are used (warning). The scanner tracks string,
//! template and comment state across lines but does not parse the language,
//! so results are approximate.

use std::sync::OnceLock;

use regex::Regex;

use crate::kernel::services::ports::{
    Diagnostic, DiagnosticSeverity, DiagnosticsProvider, Position, TextRange,
};

const SOURCE: &str = "style";
const LANGUAGES: &[&str] = &["javascript", "typescript"];

/// Line endings that never need a semicolon.
const OPEN_ENDINGS: &[char] = &[
    ';', '{', '}', '(', '[', ',', ':', '.', '+', '-', '*', '/', '=', '&', '|', '?', '>', '<', '!',
];
/// Line starts that continue the previous expression.
const CONTINUATIONS: &[char] = &['.', '?', ':', '+', '-', '*', '/', '&', '|', ')', ']', ','];
const BLOCK_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "try", "catch", "finally", "function", "class",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct StyleLinter;

impl DiagnosticsProvider for StyleLinter {
    fn supports(&self, language: &str) -> bool {
        LANGUAGES.contains(&language)
    }

    fn diagnose(&self, language: &str, text: &str) -> Vec<Diagnostic> {
        if !self.supports(language) {
            return Vec::new();
        }
        let lines = scan(text);
        let mut found = Vec::new();
        check_quotes(&lines, &mut found);
        check_semicolons(&lines, &mut found);
        check_unused(&lines, &mut found);
        found.sort_by_key(|d| (d.range.start.line, d.range.start.column));
        found
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Single,
    Double,
    Template,
    Comment,
}

struct ScannedLine {
    /// The line with comments blanked out; char columns match the source.
    code: String,
    starts_in_code: bool,
    ends_in_code: bool,
    /// Char column spans of double-quoted literals.
    doubles: Vec<(usize, usize)>,
}

fn scan(text: &str) -> Vec<ScannedLine> {
    let mut state = State::Code;
    let mut lines = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        let starts_in_code = state == State::Code;
        let mut code = String::with_capacity(line.len());
        let mut doubles = Vec::new();
        let mut opened = 0;
        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            let next = chars.get(i + 1).copied();
            match state {
                State::Code => match (ch, next) {
                    ('/', Some('/')) => break,
                    ('/', Some('*')) => {
                        state = State::Comment;
                        code.push_str("  ");
                        i += 2;
                        continue;
                    }
                    ('\'', _) => state = State::Single,
                    ('"', _) => {
                        state = State::Double;
                        opened = i;
                    }
                    ('`', _) => state = State::Template,
                    _ => {}
                },
                State::Comment => {
                    if (ch, next) == ('*', Some('/')) {
                        state = State::Code;
                        code.push_str("  ");
                        i += 2;
                    } else {
                        code.push(' ');
                        i += 1;
                    }
                    continue;
                }
                State::Single | State::Double | State::Template => match ch {
                    '\\' => {
                        code.push(ch);
                        if let Some(escaped) = next {
                            code.push(escaped);
                        }
                        i += 2;
                        continue;
                    }
                    '\'' if state == State::Single => state = State::Code,
                    '"' if state == State::Double => {
                        doubles.push((opened, i + 1));
                        state = State::Code;
                    }
                    '`' if state == State::Template => state = State::Code,
                    _ => {}
                },
            }
            code.push(ch);
            i += 1;
        }
        if matches!(state, State::Single | State::Double) {
            state = State::Code;
        }
        lines.push(ScannedLine {
            code,
            starts_in_code,
            ends_in_code: state == State::Code,
            doubles,
        });
    }
    lines
}

fn diagnostic(
    line: usize,
    start: usize,
    end: usize,
    severity: DiagnosticSeverity,
    message: String,
) -> Diagnostic {
    Diagnostic {
        range: TextRange {
            start: Position::new(line as u32, start as u32),
            end: Position::new(line as u32, end as u32),
        },
        severity,
        message,
        source: Some(SOURCE.to_string()),
    }
}

fn check_quotes(lines: &[ScannedLine], found: &mut Vec<Diagnostic>) {
    for (n, line) in lines.iter().enumerate() {
        for &(start, end) in &line.doubles {
            found.push(diagnostic(
                n,
                start,
                end,
                DiagnosticSeverity::Error,
                "Strings must use singlequote.".to_string(),
            ));
        }
    }
}

fn check_semicolons(lines: &[ScannedLine], found: &mut Vec<Diagnostic>) {
    for (n, line) in lines.iter().enumerate() {
        if !line.starts_in_code || !line.ends_in_code {
            continue;
        }
        let code = line.code.trim_end();
        let trimmed = code.trim_start();
        let Some(last) = trimmed.chars().last() else {
            continue;
        };
        if OPEN_ENDINGS.contains(&last) || trimmed.starts_with('<') || trimmed.starts_with('@') {
            continue;
        }
        let first_word = trimmed
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .next()
            .unwrap_or_default();
        if BLOCK_KEYWORDS.contains(&first_word) {
            continue;
        }
        let continued = lines[n + 1..]
            .iter()
            .map(|next| next.code.trim_start())
            .find(|next| !next.is_empty())
            .and_then(|next| next.chars().next())
            .is_some_and(|c| CONTINUATIONS.contains(&c));
        if continued {
            continue;
        }
        let column = code.chars().count();
        found.push(diagnostic(
            n,
            column,
            column,
            DiagnosticSeverity::Error,
            "Missing semicolon.".to_string(),
        ));
    }
}

fn declaration_pattern() -> Option<&'static Regex> {
    static DECLARATION: OnceLock<Option<Regex>> = OnceLock::new();
    DECLARATION
        .get_or_init(|| Regex::new(r"\b(?:const|let|var)\s+([A-Za-z_][A-Za-z0-9_]*)\s*=").ok())
        .as_ref()
}

fn check_unused(lines: &[ScannedLine], found: &mut Vec<Diagnostic>) {
    let Some(declaration) = declaration_pattern() else {
        return;
    };
    let all_code: String = lines
        .iter()
        .map(|line| line.code.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    for (n, line) in lines.iter().enumerate() {
        if line.code.trim_start().starts_with("export") {
            continue;
        }
        for caps in declaration.captures_iter(&line.code) {
            let Some(name) = caps.get(1) else {
                continue;
            };
            let Ok(usage) = Regex::new(&format!(r"\b{}\b", regex::escape(name.as_str()))) else {
                continue;
            };
            if usage.find_iter(&all_code).count() > 1 {
                continue;
            }
            let start = line.code[..name.start()].chars().count();
            let end = start + name.as_str().chars().count();
            found.push(diagnostic(
                n,
                start,
                end,
                DiagnosticSeverity::Warning,
                format!("'{}' is assigned a value but never used.", name.as_str()),
            ));
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/lint.rs"]
mod tests;
