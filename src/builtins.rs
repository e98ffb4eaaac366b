// builtins.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::info;

use crate::config::Config;
use crate::dispatch::{self, Feature, Request};
use crate::error::Result;
use crate::history::{EXPORT_CONTENT_TYPE, EXPORT_HEADER};
use crate::session::Session;
use crate::util::{render_value, writeln_ignore_broken_pipe};

pub const BUILTINS: [&str; 5] = ["clear", "exit", "export", "help", "history"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// Runs one command line, printing errors instead of returning them.
/// Faults never reach the history.
pub fn execute<W: Write>(words: &[String], session: &mut Session, config: &Config, out: &mut W) -> Flow {
    match run_command(words, session, config, out) {
        Ok(flow) => flow,
        Err(e) => {
            let _ = writeln_ignore_broken_pipe(&mut *out, format!("error: {}", e));
            Flow::Continue
        }
    }
}

pub fn run_command<W: Write>(
    words: &[String],
    session: &mut Session,
    config: &Config,
    out: &mut W,
) -> Result<Flow> {
    let Some(command) = words.first() else {
        return Ok(Flow::Continue);
    };
    match command.as_str() {
        "exit" => Ok(Flow::Exit(
            words.get(1).and_then(|s| s.parse::<i32>().ok()).unwrap_or(0),
        )),
        "help" => {
            help(words.get(1).map(String::as_str), out)?;
            Ok(Flow::Continue)
        }
        "history" => {
            let limit = words.get(1).and_then(|s| s.parse::<usize>().ok());
            history(session, limit, out)?;
            Ok(Flow::Continue)
        }
        "export" => {
            let target = words.get(1).map(Path::new).unwrap_or(config.export_path.as_path());
            export(session, target, out)?;
            Ok(Flow::Continue)
        }
        "clear" | "clear_history" => {
            session.clear_history();
            info!("history cleared");
            writeln_ignore_broken_pipe(out, "history cleared")?;
            Ok(Flow::Continue)
        }
        _ => {
            let request = Request::from_words(words)?;
            let outcome = dispatch::handle(session, &request)?;
            writeln_ignore_broken_pipe(out, format!("Result: {}", render_value(&outcome.result)))?;
            Ok(Flow::Continue)
        }
    }
}

fn help<W: Write>(topic: Option<&str>, out: &mut W) -> Result<()> {
    match topic.map(str::parse::<Feature>) {
        Some(Ok(feature)) => {
            let params = feature.params().iter().map(|p| format!("{}=", p)).join(" ");
            writeln_ignore_broken_pipe(&mut *out, format!("{} {}", feature, params))?;
            if let Some((key, ops)) = feature.operations() {
                writeln_ignore_broken_pipe(&mut *out, format!("  {}: {}", key, ops.iter().join(", ")))?;
            }
        }
        Some(Err(e)) => return Err(e),
        None => {
            let features = Feature::ALL.iter().map(|f| f.name()).join(" ");
            writeln_ignore_broken_pipe(&mut *out, format!("features: {}", features))?;
            writeln_ignore_broken_pipe(&mut *out, format!("commands: {}", BUILTINS.iter().join(" ")))?;
            writeln_ignore_broken_pipe(&mut *out, "usage: <feature> key=value ...  (ans = last result, help <feature> for parameters)")?;
        }
    }
    Ok(())
}

fn history<W: Write>(session: &Session, limit: Option<usize>, out: &mut W) -> Result<()> {
    let log = session.history();
    if log.is_empty() {
        writeln_ignore_broken_pipe(out, "history is empty")?;
        return Ok(());
    }
    for (i, record) in log.all().take(limit.unwrap_or(usize::MAX)).enumerate() {
        writeln_ignore_broken_pipe(
            &mut *out,
            format!(
                "{:>5}  {}  {:<12} {} -> {}",
                i + 1,
                record.timestamp,
                record.feature,
                record.input,
                render_value(&record.result)
            ),
        )?;
    }
    Ok(())
}

/// `-` streams the CSV to `out`; anything else is a file path.
fn export<W: Write>(session: &Session, target: &Path, out: &mut W) -> Result<()> {
    let log = session.history();
    if target == Path::new("-") {
        log.write_csv(&mut *out)?;
        return Ok(());
    }
    let mut file = BufWriter::new(File::create(target)?);
    log.write_csv(&mut file)?;
    file.flush()?;
    info!(path = %target.display(), records = log.len(), content_type = EXPORT_CONTENT_TYPE, "history exported");
    writeln_ignore_broken_pipe(
        out,
        format!(
            "exported {} records ({}) to {}",
            log.len(),
            EXPORT_HEADER.join(","),
            target.display()
        ),
    )?;
    Ok(())
}
