use super::*;
use crate::kernel::services::adapters::BufferEditor;
use crate::kernel::services::ports::{FetchError, SuggestionResponse};

fn respond(text: &str) -> FetchOutcome {
    Ok(SuggestionResponse {
        suggestion: Some(text.to_string()),
    })
}

fn editor_at_end(text: &str) -> BufferEditor {
    let mut editor = BufferEditor::new(text);
    editor.set_cursor(Position::new(0, u32::MAX));
    editor
}

#[test]
fn request_builds_payload_from_cursor() {
    let mut editor = editor_at_end("let x = ");
    let mut controller = SuggestionController::default();

    let pending = controller.request_suggestion("completion", &mut editor).unwrap();
    assert_eq!(pending.generation, 1);
    assert_eq!(pending.anchor, Position::new(0, 8));
    assert_eq!(pending.request.file_content, "let x = ");
    assert_eq!(pending.request.cursor_column, 8);
    assert_eq!(pending.request.suggestion_type, "completion");
    assert!(controller.is_loading());
}

#[test]
fn disabled_controller_never_fetches() {
    let mut editor = editor_at_end("x");
    let mut controller = SuggestionController::new(false);
    assert!(controller.request_suggestion("completion", &mut editor).is_none());

    assert!(controller.toggle_enabled());
    assert!(controller.request_suggestion("completion", &mut editor).is_some());
}

#[test]
fn missing_cursor_skips_request() {
    let mut editor = BufferEditor::new("x");
    editor.clear_cursor();
    let mut controller = SuggestionController::default();
    assert!(controller.request_suggestion("completion", &mut editor).is_none());
    assert_eq!(controller.phase(), SuggestionPhase::Idle);
}

#[test]
fn successful_response_shows_ghost_text() {
    let mut editor = editor_at_end("let x = ");
    let mut controller = SuggestionController::default();
    let pending = controller.request_suggestion("completion", &mut editor).unwrap();

    assert!(controller.complete(pending.generation, respond("  42;\n"), &mut editor));
    assert_eq!(controller.phase(), SuggestionPhase::Suggested);
    let suggestion = controller.suggestion().unwrap();
    assert_eq!(suggestion.text, "42;");

    let (_, decoration) = editor.decorations().next().unwrap();
    assert_eq!(decoration.class_name, SUGGESTION_DECORATION_CLASS);
    assert_eq!(decoration.after_text.as_deref(), Some("42;"));
    assert_eq!(editor.text(), "let x = ");
}

#[test]
fn accept_inserts_text_and_clears_decoration() {
    let mut editor = editor_at_end("let x = ");
    let mut controller = SuggestionController::default();
    let pending = controller.request_suggestion("completion", &mut editor).unwrap();
    controller.complete(pending.generation, respond("1: 42;"), &mut editor);

    assert_eq!(
        controller.accept(&mut editor),
        Some(SuggestionOutcome::Accepted)
    );
    assert_eq!(editor.text(), "let x = 42;");
    assert_eq!(editor.decoration_count(), 0);
    assert_eq!(controller.phase(), SuggestionPhase::Idle);
    assert_eq!(controller.accept(&mut editor), None);
}

#[test]
fn reject_removes_decoration_without_editing() {
    let mut editor = editor_at_end("fn ");
    let mut controller = SuggestionController::default();
    let pending = controller.request_suggestion("completion", &mut editor).unwrap();
    controller.complete(pending.generation, respond("main() {}"), &mut editor);

    assert_eq!(
        controller.reject(&mut editor),
        Some(SuggestionOutcome::Rejected)
    );
    assert_eq!(editor.text(), "fn ");
    assert_eq!(editor.decoration_count(), 0);
    assert!(controller.suggestion().is_none());
    assert_eq!(controller.reject(&mut editor), None);
}

#[test]
fn clear_while_fetching_drops_the_response() {
    let mut editor = editor_at_end("a");
    let mut controller = SuggestionController::default();
    let pending = controller.request_suggestion("completion", &mut editor).unwrap();

    assert_eq!(controller.clear(&mut editor), Some(SuggestionOutcome::Cleared));
    assert!(!controller.complete(pending.generation, respond("b"), &mut editor));
    assert!(controller.suggestion().is_none());
    assert_eq!(editor.decoration_count(), 0);
}

#[test]
fn out_of_order_responses_keep_latest() {
    let mut editor = editor_at_end("x = ");
    let mut controller = SuggestionController::default();
    let first = controller.request_suggestion("completion", &mut editor).unwrap();
    let second = controller.request_suggestion("completion", &mut editor).unwrap();
    assert!(second.generation > first.generation);

    assert!(controller.complete(second.generation, respond("second"), &mut editor));
    assert!(!controller.complete(first.generation, respond("first"), &mut editor));

    assert_eq!(controller.suggestion().unwrap().text, "second");
    assert_eq!(editor.decoration_count(), 1);
}

#[test]
fn new_request_supersedes_visible_suggestion() {
    let mut editor = editor_at_end("x = ");
    let mut controller = SuggestionController::default();
    let first = controller.request_suggestion("completion", &mut editor).unwrap();
    controller.complete(first.generation, respond("1"), &mut editor);
    assert_eq!(editor.decoration_count(), 1);

    controller.request_suggestion("completion", &mut editor).unwrap();
    assert_eq!(editor.decoration_count(), 0);
    assert!(controller.is_loading());
}

#[test]
fn failures_and_empty_payloads_degrade_to_idle() {
    let mut editor = editor_at_end("x");
    let mut controller = SuggestionController::default();

    let pending = controller.request_suggestion("completion", &mut editor).unwrap();
    assert!(controller.complete(pending.generation, Err(FetchError::Status(500)), &mut editor));
    assert_eq!(controller.phase(), SuggestionPhase::Idle);

    let pending = controller.request_suggestion("completion", &mut editor).unwrap();
    assert!(controller.complete(pending.generation, respond("   "), &mut editor));
    assert!(controller.suggestion().is_none());

    let pending = controller.request_suggestion("completion", &mut editor).unwrap();
    let empty = Ok(SuggestionResponse { suggestion: None });
    assert!(controller.complete(pending.generation, empty, &mut editor));
    assert_eq!(controller.phase(), SuggestionPhase::Idle);
    assert_eq!(editor.decoration_count(), 0);
}

#[test]
fn strip_line_numbers_handles_every_line() {
    assert_eq!(strip_line_numbers("1: a\n2:  b\nc"), "a\nb\nc");
    assert!(matches!(strip_line_numbers("plain"), Cow::Borrowed("plain")));
}
