//! Whitespace formatter for the web languages.

use crate::kernel::services::ports::FormattingProvider;

const LANGUAGES: &[&str] = &["javascript", "typescript", "css", "html"];
const INDENT: &str = "  ";

/// Expands leading tabs, strips trailing whitespace, collapses blank-line runs
/// and ends the document with exactly one newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceFormatter;

impl FormattingProvider for WhitespaceFormatter {
    fn supports(&self, language: &str) -> bool {
        LANGUAGES.contains(&language)
    }

    fn format(&self, language: &str, text: &str) -> Option<String> {
        if !self.supports(language) {
            return None;
        }

        let mut out = String::with_capacity(text.len());
        let mut pending_blank = false;
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                pending_blank = !out.is_empty();
                continue;
            }
            if pending_blank {
                out.push('\n');
                pending_blank = false;
            }
            let body = line.trim_start_matches('\t');
            let tabs = line.len() - body.len();
            for _ in 0..tabs {
                out.push_str(INDENT);
            }
            out.push_str(body);
            out.push('\n');
        }
        Some(out)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/format.rs"]
mod tests;
