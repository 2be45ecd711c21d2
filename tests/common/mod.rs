// Test utility module for covmap integration tests
#![allow(dead_code)]

/// Format one dump row with `indent` leading spaces and all six metrics set
/// to `overall`.
pub fn row(indent: usize, overall: f64, name: &str) -> String {
    format!(
        "{:indent$}{o:.2} {o:.2} {o:.2} {o:.2} {o:.2} {o:.2} {name}",
        "",
        o = overall,
        name = name,
        indent = indent
    )
}

/// Join rows into a dump with a trailing newline.
pub fn dump(rows: &[String]) -> String {
    let mut text = rows.join("\n");
    text.push('\n');
    text
}
