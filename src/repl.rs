// repl.rs

use std::io;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config as EditorConfig, Editor};
use tracing::{debug, error};

use crate::builtins::{execute, Flow};
use crate::completion::FeatureCompleter;
use crate::config::Config;
use crate::parser::split_words;
use crate::session::Session;

pub const PROMPT: &str = "calc> ";

/// Interactive loop. The session lives exactly as long as the loop; its
/// history is gone once this returns. Returns the requested exit code.
pub fn start_repl(config: &Config) -> Result<i32> {
    let editor_config = EditorConfig::builder()
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();
    let mut rl: Editor<FeatureCompleter, DefaultHistory> =
        Editor::with_config(editor_config).context("failed to create line editor")?;
    rl.set_helper(Some(FeatureCompleter::new()));

    let mut session = Session::with_capacity(config.history_capacity);
    debug!(capacity = config.history_capacity, "session started");
    let mut stdout = io::stdout();
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);
                let words = split_words(trimmed);
                if let Flow::Exit(code) = execute(&words, &mut session, config, &mut stdout) {
                    return Ok(code);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                error!(error = %err, "readline failed");
                return Err(err).context("reading input");
            }
        }
    }
    debug!(records = session.history().len(), "session ended");
    Ok(0)
}

/// Runs a single command from process arguments with a fresh session.
pub fn run_once(args: &[String], config: &Config) -> i32 {
    let mut session = Session::with_capacity(config.history_capacity);
    match execute(args, &mut session, config, &mut io::stdout()) {
        Flow::Exit(code) => code,
        Flow::Continue => 0,
    }
}
