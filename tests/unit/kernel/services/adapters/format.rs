use super::*;

#[test]
fn normalizes_whitespace() {
    let input = "\n\nfunction a() {\n\treturn 1;   \n}\n\n\n\nconst b = 2;\n\n";
    let formatted = WhitespaceFormatter.format("javascript", input).unwrap();
    assert_eq!(formatted, "function a() {\n  return 1;\n}\n\nconst b = 2;\n");
}

#[test]
fn formatted_output_is_stable() {
    let once = WhitespaceFormatter
        .format("css", "a {\r\n\tcolor: red; \r\n}")
        .unwrap();
    assert_eq!(once, "a {\n  color: red;\n}\n");
    assert_eq!(WhitespaceFormatter.format("css", &once).unwrap(), once);
}

#[test]
fn other_languages_are_declined() {
    assert!(!WhitespaceFormatter.supports("python"));
    assert_eq!(WhitespaceFormatter.format("markdown", "x  \n"), None);
}
