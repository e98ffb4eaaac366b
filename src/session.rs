// session.rs

use serde_json::Value;

use crate::history::{History, Record};

/// Per-session state. Owns the computation log; dropping the session drops
/// its history. Nothing here is shared between sessions.
#[derive(Debug, Default)]
pub struct Session {
    history: History,
    last_result: Option<Value>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: History::with_capacity(capacity),
            last_result: None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Logs one computation. A defined result also becomes the value `ans`
    /// refers to.
    pub fn record(&mut self, feature: &str, input: Value, result: Value) {
        if !result.is_null() {
            self.last_result = Some(result.clone());
        }
        self.history.push(Record::new(feature, input, result));
    }

    /// Result of the most recent computation that had one.
    pub fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.last_result = None;
    }
}
