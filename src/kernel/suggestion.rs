//! Inline AI suggestion state machine:
//! `Idle -> Fetching -> Suggested -> {Accepted | Rejected | Cleared} -> Idle`.
//!
//! Fetching itself happens outside the controller. `request_suggestion` hands
//! out a [`PendingFetch`] tagged with a generation and `complete` applies the
//! response only if that generation is still the latest one issued.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::kernel::services::ports::{
    Decoration, DecorationId, EditorCapability, FetchOutcome, Position, SuggestionRequest,
    TextRange,
};

pub const SUGGESTION_DECORATION_CLASS: &str = "ai-suggestion-ghost";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionPhase {
    Idle,
    Fetching,
    Suggested,
}

/// How a suggestion left the `Suggested`/`Fetching` phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Accepted,
    Rejected,
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub anchor: Position,
    pub decoration_ids: Vec<DecorationId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub generation: u64,
    pub anchor: Position,
    pub request: SuggestionRequest,
}

#[derive(Debug)]
pub struct SuggestionController {
    enabled: bool,
    phase: SuggestionPhase,
    generation: u64,
    pending_anchor: Option<Position>,
    suggestion: Option<Suggestion>,
}

impl Default for SuggestionController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SuggestionController {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            phase: SuggestionPhase::Idle,
            generation: 0,
            pending_anchor: None,
            suggestion: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SuggestionPhase::Fetching
    }

    pub fn phase(&self) -> SuggestionPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.suggestion.as_ref()
    }

    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Starts a new fetch. Returns `None` when disabled or when the editor has
    /// no cursor. Any suggestion still on screen is superseded.
    pub fn request_suggestion(
        &mut self,
        kind: &str,
        editor: &mut dyn EditorCapability,
    ) -> Option<PendingFetch> {
        if !self.enabled {
            return None;
        }
        let anchor = editor.cursor()?;

        self.discard(editor);
        self.generation = self.generation.wrapping_add(1);
        self.phase = SuggestionPhase::Fetching;
        self.pending_anchor = Some(anchor);

        Some(PendingFetch {
            generation: self.generation,
            anchor,
            request: SuggestionRequest {
                file_content: editor.text(),
                cursor_line: anchor.line,
                cursor_column: anchor.column,
                suggestion_type: kind.to_string(),
            },
        })
    }

    /// Applies a fetch result. Returns `false` for stale responses, which
    /// leave the state untouched.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: FetchOutcome,
        editor: &mut dyn EditorCapability,
    ) -> bool {
        if generation != self.generation || self.phase != SuggestionPhase::Fetching {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale suggestion response"
            );
            return false;
        }

        self.phase = SuggestionPhase::Idle;
        let Some(anchor) = self.pending_anchor.take() else {
            return true;
        };

        let text = match outcome {
            Ok(response) => response
                .suggestion
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "suggestion fetch failed");
                return true;
            }
        };
        let Some(text) = text else {
            tracing::warn!("no suggestion received from endpoint");
            return true;
        };

        let decoration_ids = editor.add_decorations(vec![Decoration {
            range: TextRange::point(anchor),
            class_name: SUGGESTION_DECORATION_CLASS.to_string(),
            after_text: Some(text.clone()),
        }]);
        self.suggestion = Some(Suggestion {
            text,
            anchor,
            decoration_ids,
        });
        self.phase = SuggestionPhase::Suggested;
        true
    }

    pub fn accept(&mut self, editor: &mut dyn EditorCapability) -> Option<SuggestionOutcome> {
        if self.phase != SuggestionPhase::Suggested {
            return None;
        }
        let suggestion = self.suggestion.take()?;
        self.phase = SuggestionPhase::Idle;

        let text = strip_line_numbers(&suggestion.text);
        editor.apply_edit(TextRange::point(suggestion.anchor), &text);
        if !suggestion.decoration_ids.is_empty() {
            editor.remove_decorations(&suggestion.decoration_ids);
        }
        Some(SuggestionOutcome::Accepted)
    }

    pub fn reject(&mut self, editor: &mut dyn EditorCapability) -> Option<SuggestionOutcome> {
        self.discard(editor).then_some(SuggestionOutcome::Rejected)
    }

    pub fn clear(&mut self, editor: &mut dyn EditorCapability) -> Option<SuggestionOutcome> {
        self.discard(editor).then_some(SuggestionOutcome::Cleared)
    }

    fn discard(&mut self, editor: &mut dyn EditorCapability) -> bool {
        let had_pending = self.phase != SuggestionPhase::Idle;
        self.phase = SuggestionPhase::Idle;
        self.pending_anchor = None;
        match self.suggestion.take() {
            Some(suggestion) => {
                if !suggestion.decoration_ids.is_empty() {
                    editor.remove_decorations(&suggestion.decoration_ids);
                }
                true
            }
            None => had_pending,
        }
    }
}

/// Removes `N:` line-number prefixes the model sometimes echoes back.
pub fn strip_line_numbers(text: &str) -> Cow<'_, str> {
    static PREFIX: OnceLock<Option<Regex>> = OnceLock::new();
    match PREFIX.get_or_init(|| Regex::new(r"(?m)^\d+:\s*").ok()) {
        Some(re) => re.replace_all(text, ""),
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/suggestion.rs"]
mod tests;
