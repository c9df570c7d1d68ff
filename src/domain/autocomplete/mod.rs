//! Rule-based code suggestions.
//!
//! A stateless collaborator of the room service: given a buffer, a cursor
//! offset and a language tag it proposes up to [`MAX_SUGGESTIONS`] snippets
//! based on the line the cursor sits on. It never touches room state.

use crate::domain::room::Language;

/// Upper bound on suggestions returned for one request.
pub const MAX_SUGGESTIONS: usize = 3;

/// Returns up to three suggestions for the line under the cursor.
///
/// `cursor_position` counts characters, not bytes, and is clamped to the
/// buffer length.
pub fn suggest(code: &str, cursor_position: usize, language: &Language) -> Vec<String> {
    let line = current_line(code, cursor_position);

    let mut suggestions = match language.as_str() {
        "python" => python_suggestions(line),
        "javascript" | "typescript" => javascript_suggestions(line),
        "java" => java_suggestions(line),
        _ => Vec::new(),
    };

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Text between the last newline before the cursor and the cursor itself.
fn current_line(code: &str, cursor_position: usize) -> &str {
    let end = code
        .char_indices()
        .nth(cursor_position)
        .map(|(byte, _)| byte)
        .unwrap_or(code.len());
    let prefix = &code[..end];
    match prefix.rfind('\n') {
        Some(newline) => &prefix[newline + 1..],
        None => prefix,
    }
}

fn python_suggestions(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let mut out = Vec::new();

    if line.contains("def ") && line.contains('(') && trimmed.ends_with(':') {
        out.push(r#""""Function docstring""""#);
        out.push("pass");
    }
    if trimmed.starts_with("class ") {
        out.push("def __init__(self):");
        out.push("pass");
    }
    if line.contains("import ") {
        out.extend(["numpy as np", "pandas as pd", "matplotlib.pyplot as plt"]);
    }
    if trimmed.starts_with("for ") {
        out.push("pass");
    }
    if trimmed.starts_with("if ") {
        out.push("pass");
    }
    if line.contains("print(") {
        out.push(r#"f"Value: {variable}""#);
    }
    if line.contains("self.") {
        out.extend(["self.attribute", "self.method()"]);
    }

    out.into_iter().map(String::from).collect()
}

fn javascript_suggestions(line: &str) -> Vec<String> {
    let mut out = Vec::new();

    if line.contains("function ") || (line.contains("const ") && line.contains("=>")) {
        out.push("return;");
    }
    if line.contains("console.") {
        out.extend(["log()", "error()", "warn()"]);
    }
    if line.contains(".map(") {
        out.push("(item) => item");
    }
    if line.contains(".filter(") {
        out.push("(item) => item !== null");
    }
    if line.contains("async ") {
        out.push("await fetch()");
    }

    out.into_iter().map(String::from).collect()
}

fn java_suggestions(line: &str) -> Vec<String> {
    let mut out = Vec::new();

    if line.contains("public class ") {
        out.push("public static void main(String[] args) {");
    }
    if line.contains("System.out.") {
        out.extend(["println()", "print()"]);
    }
    if line.contains("public ") && line.contains('(') {
        out.push("return;");
    }

    out.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lang(tag: &str) -> Language {
        Language::new(tag).unwrap()
    }

    fn at_end(code: &str, tag: &str) -> Vec<String> {
        suggest(code, code.chars().count(), &lang(tag))
    }

    #[test]
    fn python_function_header_suggests_docstring_and_pass() {
        let out = at_end("def add(a, b):", "python");
        assert_eq!(out, vec![r#""""Function docstring""""#, "pass"]);
    }

    #[test]
    fn python_import_suggests_common_modules() {
        let out = at_end("import ", "python");
        assert_eq!(out, vec!["numpy as np", "pandas as pd", "matplotlib.pyplot as plt"]);
    }

    #[test]
    fn python_class_line_suggests_constructor() {
        let out = at_end("    class Foo:", "python");
        assert_eq!(out, vec!["def __init__(self):", "pass"]);
    }

    #[test]
    fn python_results_are_capped_in_rule_order() {
        // docstring, pass and the print hint survive; the self.* pair is cut
        let out = at_end("def f(self): print(self.x):", "python");
        assert_eq!(out.len(), MAX_SUGGESTIONS);
        assert_eq!(out[0], r#""""Function docstring""""#);
    }

    #[test]
    fn only_the_line_under_the_cursor_counts() {
        let code = "import os\nx = 1";
        assert!(at_end(code, "python").is_empty());
        // cursor at end of first line
        let out = suggest(code, 9, &lang("python"));
        assert_eq!(out[0], "numpy as np");
    }

    #[test]
    fn cursor_past_end_is_clamped() {
        let out = suggest("for i in x:", 10_000, &lang("python"));
        assert_eq!(out, vec!["pass"]);
    }

    #[test]
    fn cursor_counts_characters_not_bytes() {
        let code = "s = 'é'\nprint(";
        let out = suggest(code, code.chars().count(), &lang("python"));
        assert_eq!(out, vec![r#"f"Value: {variable}""#]);
    }

    #[test]
    fn javascript_console_suggests_methods() {
        let out = at_end("console.", "javascript");
        assert_eq!(out, vec!["log()", "error()", "warn()"]);
    }

    #[test]
    fn typescript_shares_javascript_rules() {
        let out = at_end("const f = () =>", "typescript");
        assert_eq!(out, vec!["return;"]);
    }

    #[test]
    fn javascript_const_without_arrow_is_not_a_function() {
        assert!(at_end("const x = 1", "javascript").is_empty());
    }

    #[test]
    fn java_class_suggests_main() {
        let out = at_end("public class Main {", "java");
        assert_eq!(out[0], "public static void main(String[] args) {");
    }

    #[test]
    fn unknown_language_yields_nothing() {
        assert!(at_end("import os", "cobol").is_empty());
    }

    proptest! {
        #[test]
        fn never_more_than_three(code in ".{0,200}", cursor in 0usize..400, tag in "python|javascript|typescript|java|go") {
            let out = suggest(&code, cursor, &lang(&tag));
            prop_assert!(out.len() <= MAX_SUGGESTIONS);
        }
    }
}
