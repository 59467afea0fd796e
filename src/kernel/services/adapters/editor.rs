//! Rope-backed editor buffer implementing [`EditorCapability`].
//!
//! Every content change re-runs the registered diagnostics providers and is
//! then broadcast to change subscribers.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use ropey::{Rope, RopeSlice};
use rustc_hash::FxHashMap;

use crate::kernel::services::ports::{
    ContentChange, Decoration, DecorationId, Diagnostic, DiagnosticsProvider, EditorCapability,
    FormattingProvider, Position, TextRange,
};
use crate::models::PLAIN_TEXT;

#[derive(Default)]
pub struct BufferEditor {
    rope: Rope,
    cursor: Option<Position>,
    decorations: FxHashMap<DecorationId, Decoration>,
    next_decoration: u64,
    version: u64,
    language: String,
    formatters: Vec<Arc<dyn FormattingProvider>>,
    linters: Vec<Arc<dyn DiagnosticsProvider>>,
    diagnostics: Vec<Diagnostic>,
    subscribers: Vec<Sender<ContentChange>>,
}

impl BufferEditor {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Some(Position::default()),
            language: PLAIN_TEXT.to_string(),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self.validate();
        self
    }

    /// Bumped on every content change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn decorations(&self) -> impl Iterator<Item = (&DecorationId, &Decoration)> {
        self.decorations.iter()
    }

    pub fn decoration_count(&self) -> usize {
        self.decorations.len()
    }

    fn char_index(&self, position: Position) -> usize {
        if self.rope.len_chars() == 0 {
            return 0;
        }
        let line = (position.line as usize).min(self.rope.len_lines().saturating_sub(1));
        let line_start = self.rope.line_to_char(line);
        let col = (position.column as usize).min(line_len_chars(self.rope.line(line)));
        (line_start + col).min(self.rope.len_chars())
    }

    fn content_changed(&mut self) {
        self.version += 1;
        self.validate();
        if self.subscribers.is_empty() {
            return;
        }
        let change = ContentChange {
            version: self.version,
            text: self.rope.to_string(),
        };
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    fn validate(&mut self) {
        if self.linters.is_empty() {
            return;
        }
        let text = self.rope.to_string();
        let language = self.language.as_str();
        let found: Vec<Diagnostic> = self
            .linters
            .iter()
            .filter(|linter| linter.supports(language))
            .flat_map(|linter| linter.diagnose(language, &text))
            .collect();
        self.diagnostics = found;
    }

    fn position_of(&self, char_index: usize) -> Position {
        let char_index = char_index.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_index);
        let column = char_index - self.rope.line_to_char(line);
        Position::new(line as u32, column as u32)
    }
}

impl EditorCapability for BufferEditor {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        if let Some(cursor) = self.cursor {
            let clamped = self.position_of(self.char_index(cursor));
            self.cursor = Some(clamped);
        }
        self.content_changed();
    }

    fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    fn set_cursor(&mut self, position: Position) {
        self.cursor = Some(self.position_of(self.char_index(position)));
    }

    fn apply_edit(&mut self, range: TextRange, text: &str) {
        let mut start = self.char_index(range.start);
        let mut end = self.char_index(range.end);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }
        if start == end && text.is_empty() {
            return;
        }

        self.rope.remove(start..end);
        self.rope.insert(start, text);
        let inserted = text.chars().count();
        self.cursor = Some(self.position_of(start + inserted));
        self.content_changed();
    }

    fn add_decorations(&mut self, decorations: Vec<Decoration>) -> Vec<DecorationId> {
        decorations
            .into_iter()
            .map(|decoration| {
                self.next_decoration += 1;
                let id = DecorationId(format!("decoration-{}", self.next_decoration));
                self.decorations.insert(id.clone(), decoration);
                id
            })
            .collect()
    }

    fn remove_decorations(&mut self, ids: &[DecorationId]) {
        for id in ids {
            self.decorations.remove(id);
        }
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn subscribe_changes(&mut self) -> Receiver<ContentChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn register_formatting_provider(&mut self, provider: Arc<dyn FormattingProvider>) {
        self.formatters.push(provider);
    }

    fn register_diagnostics_provider(&mut self, provider: Arc<dyn DiagnosticsProvider>) {
        self.linters.push(provider);
        self.validate();
    }

    fn format_document(&mut self) -> bool {
        let Some(formatter) = self
            .formatters
            .iter()
            .find(|f| f.supports(&self.language))
            .cloned()
        else {
            return false;
        };
        let text = self.rope.to_string();
        match formatter.format(&self.language, &text) {
            Some(formatted) if formatted != text => {
                self.set_text(&formatted);
                true
            }
            Some(_) => false,
            None => {
                tracing::debug!(language = %self.language, "formatter declined document");
                false
            }
        }
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

fn line_len_chars(line: RopeSlice<'_>) -> usize {
    let mut len = 0usize;
    let mut it = line.chars().peekable();
    while let Some(ch) = it.next() {
        if ch == '\n' {
            break;
        }
        if ch == '\r' && matches!(it.peek(), Some('\n')) {
            break;
        }
        len += 1;
    }
    len
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/editor.rs"]
mod tests;
