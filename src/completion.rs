// completion.rs

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

use crate::builtins::BUILTINS;
use crate::dispatch::Feature;

/// Completes the command word, then `key=` parameter names for the chosen
/// feature, then operation names after `op=`, `sop=`, `ctype=` or `stype=`.
#[derive(Debug, Default)]
pub struct FeatureCompleter;

impl FeatureCompleter {
    pub fn new() -> Self {
        Self
    }

    /// Candidates for the word ending at `pos`, and where that word starts.
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let word = &head[start..];
        let preceding: Vec<&str> = head[..start].split_whitespace().collect();

        let mut names: Vec<String> = match preceding.first() {
            None => BUILTINS
                .iter()
                .copied()
                .chain(Feature::ALL.iter().map(|f| f.name()))
                .filter(|n| n.starts_with(word))
                .map(str::to_string)
                .collect(),
            Some(cmd) if *cmd == "help" && preceding.len() == 1 => Feature::ALL
                .iter()
                .map(|f| f.name())
                .filter(|n| n.starts_with(word))
                .map(str::to_string)
                .collect(),
            Some(cmd) => match cmd.parse::<Feature>() {
                Ok(feature) => Self::param_candidates(feature, word),
                Err(_) => Vec::new(),
            },
        };
        names.sort();
        names.dedup();
        (start, names)
    }

    fn param_candidates(feature: Feature, word: &str) -> Vec<String> {
        if let Some((key, value)) = word.split_once('=') {
            return match feature.operations() {
                Some((op_key, ops)) if op_key == key => ops
                    .iter()
                    .filter(|op| op.starts_with(value))
                    .map(|op| format!("{}={}", key, op))
                    .collect(),
                _ => Vec::new(),
            };
        }
        feature
            .params()
            .iter()
            .filter(|p| p.starts_with(word))
            .map(|p| format!("{}=", p))
            .collect()
    }
}

impl Completer for FeatureCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, names) = self.candidates(line, pos);
        let completions = names
            .into_iter()
            .map(|n| {
                let replacement = if n.ends_with('=') { n.clone() } else { format!("{} ", n) };
                Pair {
                    display: n,
                    replacement,
                }
            })
            .collect();
        Ok((start, completions))
    }
}

impl Hinter for FeatureCompleter {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for FeatureCompleter {}

impl Validator for FeatureCompleter {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult, ReadlineError> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for FeatureCompleter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(line: &str) -> (usize, Vec<String>) {
        FeatureCompleter::new().candidates(line, line.len())
    }

    #[test]
    fn test_command_word() {
        assert_eq!(complete("s"), (0, vec!["scientific".to_string(), "sequence".to_string(), "stats".to_string()]));
        assert_eq!(complete("ex"), (0, vec!["exit".to_string(), "export".to_string()]));
        assert_eq!(complete("zz").1, Vec::<String>::new());
    }

    #[test]
    fn test_param_keys() {
        assert_eq!(complete("basic "), (6, vec!["a=".to_string(), "b=".to_string(), "op=".to_string()]));
        assert_eq!(complete("sequence a=1 s"), (13, vec!["start=".to_string(), "stype=".to_string()]));
    }

    #[test]
    fn test_operation_values() {
        assert_eq!(complete("basic op=d"), (6, vec!["op=div".to_string()]));
        assert_eq!(complete("converter ctype=").1.len(), 6);
        assert!(complete("basic a=").1.is_empty());
    }

    #[test]
    fn test_multibyte_whitespace_separator() {
        assert_eq!(complete("basic\u{3000}o"), (8, vec!["op=".to_string()]));
        assert_eq!(complete("prime\u{a0}"), (7, vec!["p=".to_string()]));
        assert_eq!(complete("\u{3000}pr"), (3, vec!["prime".to_string()]));
    }

    #[test]
    fn test_help_topic() {
        assert_eq!(complete("help pr"), (5, vec!["prime".to_string()]));
    }
}
