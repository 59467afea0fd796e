//! Editor widget capability consumed by the suggestion controller.
//!
//! Positions are zero-based; columns count chars within the line.

use std::fmt;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub const fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecorationId(pub String);

impl fmt::Display for DecorationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub range: TextRange,
    pub class_name: String,
    /// Inline text rendered after the range (ghost text).
    pub after_text: Option<String>,
}

/// Emitted after every content change, carrying the full new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub version: u64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

impl DiagnosticSeverity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "info",
            Self::Hint => "hint",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: TextRange,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub source: Option<String>,
}

/// Whole-document formatter for a set of languages.
pub trait FormattingProvider: Send + Sync {
    fn supports(&self, language: &str) -> bool;
    /// Returns the formatted document, or `None` when it cannot be formatted.
    fn format(&self, language: &str, text: &str) -> Option<String>;
}

pub trait DiagnosticsProvider: Send + Sync {
    fn supports(&self, language: &str) -> bool;
    fn diagnose(&self, language: &str, text: &str) -> Vec<Diagnostic>;
}

pub trait EditorCapability {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn cursor(&self) -> Option<Position>;
    fn set_cursor(&mut self, position: Position);
    /// Replaces `range` with `text`; the cursor moves to the end of the edit.
    fn apply_edit(&mut self, range: TextRange, text: &str);
    fn add_decorations(&mut self, decorations: Vec<Decoration>) -> Vec<DecorationId>;
    fn remove_decorations(&mut self, ids: &[DecorationId]);

    fn language(&self) -> &str;
    /// Every later content change is sent to the returned receiver.
    fn subscribe_changes(&mut self) -> Receiver<ContentChange>;
    fn register_formatting_provider(&mut self, provider: Arc<dyn FormattingProvider>);
    fn register_diagnostics_provider(&mut self, provider: Arc<dyn DiagnosticsProvider>);
    /// Formats with the first provider supporting the language. Returns
    /// whether the text changed.
    fn format_document(&mut self) -> bool;
    /// Diagnostics from the last validation of the current text.
    fn diagnostics(&self) -> &[Diagnostic];
}
