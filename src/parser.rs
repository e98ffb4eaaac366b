// parser.rs

use crate::error::{CalcError, Result};

/// Splits a command line into words. Single quotes keep their content
/// literally; inside double quotes `\"` and `\\` are escapes; outside quotes
/// a backslash escapes the next character.
pub fn split_words(line: &str) -> Vec<String> {
    enum State {
        Normal,
        Single,
        Double,
    }
    let mut tokens = Vec::new();
    let mut cur = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    let mut state = State::Normal;
    while let Some(ch) = chars.next() {
        match state {
            State::Normal => match ch {
                '\'' => {
                    state = State::Single;
                    quoted = true;
                }
                '"' => {
                    state = State::Double;
                    quoted = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        cur.push(next);
                    }
                }
                c if c.is_whitespace() => {
                    if !cur.is_empty() || quoted {
                        tokens.push(std::mem::take(&mut cur));
                        quoted = false;
                    }
                }
                _ => cur.push(ch),
            },
            State::Single => match ch {
                '\'' => state = State::Normal,
                _ => cur.push(ch),
            },
            State::Double => match ch {
                '"' => state = State::Normal,
                '\\' => match chars.peek() {
                    Some(&next) if next == '\\' || next == '"' => {
                        cur.push(next);
                        chars.next();
                    }
                    _ => cur.push('\\'),
                },
                _ => cur.push(ch),
            },
        }
    }
    if !cur.is_empty() || quoted {
        tokens.push(cur);
    }
    tokens
}

/// Splits `key=value`. The key is lowercased; the value is kept verbatim and
/// may itself contain `=`.
pub fn split_param(token: &str) -> Result<(String, String)> {
    match token.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_ascii_lowercase(), value.to_string())),
        _ => Err(CalcError::MalformedArgument(token.to_string())),
    }
}
