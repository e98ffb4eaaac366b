// history.rs

//! Bounded, newest-first log of computations with CSV export.
//!
//! The log never looks inside `input` or `result`; both are stored and
//! exported as the structured values the caller handed over.

use std::collections::VecDeque;
use std::io::Write;

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

pub const HISTORY_CAPACITY: usize = 200;
pub const EXPORT_HEADER: [&str; 4] = ["time", "feature", "input", "result"];
pub const EXPORT_FILE_NAME: &str = "calc_history.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

/// One logged computation. `result` is `Value::Null` when the operation had
/// no defined result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: String,
    pub feature: String,
    pub input: Value,
    pub result: Value,
}

impl Record {
    /// Stamps the record with the current local time (RFC 3339, seconds).
    pub fn new(feature: impl Into<String>, input: Value, result: Value) -> Self {
        let timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        Self::with_timestamp(timestamp, feature, input, result)
    }

    pub fn with_timestamp(
        timestamp: impl Into<String>,
        feature: impl Into<String>,
        input: Value,
        result: Value,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            feature: feature.into(),
            input,
            result,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_null()
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Record>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// A capacity of 0 is raised to 1 so the newest record always survives.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepends `record` and evicts the oldest entries beyond capacity.
    pub fn push(&mut self, record: Record) {
        self.entries.push_front(record);
        self.entries.truncate(self.capacity);
    }

    /// Records newest first.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Record> + '_ {
        self.entries.iter()
    }

    pub fn get(&self, n: usize) -> Option<&Record> {
        self.entries.get(n)
    }

    pub fn latest(&self) -> Option<&Record> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Streams the log as CSV: the fixed header, then one row per record,
    /// newest first. `input` and `result` are compact JSON text.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        wtr.write_record(EXPORT_HEADER)?;
        for record in &self.entries {
            let input = serde_json::to_string(&record.input)?;
            let result = serde_json::to_string(&record.result)?;
            wtr.write_record([
                record.timestamp.as_str(),
                record.feature.as_str(),
                input.as_str(),
                result.as_str(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// The whole log as CSV text. Byte-identical across calls while the log
    /// is unchanged.
    pub fn export_text(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
