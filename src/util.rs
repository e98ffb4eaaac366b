// util.rs

use std::io::Write;

use serde_json::Value;

/// Writes a line, treating a closed pipe (`calcshell ... | head`) as success.
pub fn writeln_ignore_broken_pipe<W: Write, S: AsRef<str>>(mut w: W, s: S) -> std::io::Result<()> {
    match writeln!(w, "{}", s.as_ref()) {
        Err(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Compact structured text for display; `null` reads as "no result".
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "no result".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
