//! Lint: detect bracket-key text (`[X]`) rendered without click registration.
//!
//! Every `[X]`-style hint shown in `src/render.rs` must be tappable: lines
//! added to a `ClickableList` via plain `push(...)` render the text but leave
//! it un-clickable, a recurring source of touch bugs. Hints must go through
//! `push_clickable(...)` (or be covered by a whole-area target, which the
//! render tests assert separately).

use std::fs;
use std::path::Path;

/// True when `s` contains a bracket-key pattern like `[S]`, `[1]`, `[X]`.
fn contains_bracket_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    for window in bytes.windows(3) {
        if window[0] == b'[' && window[2] == b']' && window[1].is_ascii_alphanumeric() {
            return true;
        }
    }
    false
}

/// Scan source lines for non-clickable `push(` calls carrying bracket keys.
fn find_unclickable_hints(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();
    for (line_no, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }
        if !contains_bracket_key(line) {
            continue;
        }
        if line.contains(".push(") && !line.contains("push_clickable(") {
            violations.push((line_no + 1, trimmed.to_string()));
        }
    }
    violations
}

#[test]
fn bracket_hints_in_render_are_clickable() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/render.rs");
    let source = fs::read_to_string(&path).expect("src/render.rs is readable");

    let violations = find_unclickable_hints(&source);
    assert!(
        violations.is_empty(),
        "bracket-key hints without click registration in src/render.rs:\n{}",
        violations
            .iter()
            .map(|(line, text)| format!("  line {line}: {text}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

#[test]
fn detector_matches_bracket_keys() {
    assert!(contains_bracket_key("[S] ショップ"));
    assert!(contains_bracket_key("foo [1] bar"));
    assert!(!contains_bracket_key("no brackets here"));
    assert!(!contains_bracket_key("[購入]")); // multi-byte key, not a hint key
    assert!(!contains_bracket_key("a[]b"));
}

#[test]
fn detector_flags_plain_push_only() {
    let source = r#"
        cl.push(Line::from("[S] not clickable"));
        cl.push_clickable(Line::from("[T] clickable"), 1);
        cl.push(Line::from("plain text"));
    "#;
    let violations = find_unclickable_hints(source);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].1.contains("[S]"));
}
