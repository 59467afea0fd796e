use super::*;

fn lint(text: &str) -> Vec<Diagnostic> {
    StyleLinter.diagnose("javascript", text)
}

#[test]
fn reports_quotes_semicolons_and_unused_declarations() {
    let found = lint("const greeting = \"hi\";\nlet count = 1\nconsole.log(count);\n");
    let summary: Vec<(u32, u32, u32, DiagnosticSeverity)> = found
        .iter()
        .map(|d| {
            (
                d.range.start.line,
                d.range.start.column,
                d.range.end.column,
                d.severity,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, 6, 14, DiagnosticSeverity::Warning),
            (0, 17, 21, DiagnosticSeverity::Error),
            (1, 13, 13, DiagnosticSeverity::Error),
        ]
    );
    assert_eq!(found[0].message, "'greeting' is assigned a value but never used.");
    assert_eq!(found[1].message, "Strings must use singlequote.");
    assert_eq!(found[2].message, "Missing semicolon.");
    assert!(found.iter().all(|d| d.source.as_deref() == Some("style")));
}

#[test]
fn comments_and_template_literals_are_skipped() {
    let text = "// say \"hi\"\n/* \"block\"\n   still comment */\nconst msg = `multi\n\"line\"`;\nconsole.log('it\\'s', msg);\n";
    assert_eq!(lint(text), Vec::new());
}

#[test]
fn continued_expressions_need_no_semicolon() {
    let text = "const total = items\n  .map(x => x)\n  .length;\nif (total) {\n  console.log(total);\n}\n";
    assert_eq!(lint(text), Vec::new());
}

#[test]
fn only_script_languages_are_checked() {
    assert!(StyleLinter.supports("typescript"));
    assert!(!StyleLinter.supports("css"));
    assert!(StyleLinter.diagnose("css", "a { content: \"x\" }").is_empty());
}
