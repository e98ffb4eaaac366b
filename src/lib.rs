//! # calcshell
//!
//! A stateless numeric-operation engine with a per-session, size-bounded
//! activity log that exports as CSV.
//!
//! ## Modules
//!
//! - [`arith`], [`stats`], [`convert`], [`sequence`]: the engine. Pure
//!   functions over typed values; undefined results are `None`.
//! - [`history`]: newest-first log capped at 200 records, with CSV export.
//! - [`session`]: the per-session context owning one log.
//! - [`dispatch`]: turns a feature name and raw parameters into one engine
//!   call and logs it.
//! - [`builtins`], [`repl`], [`completion`]: the interactive front end.

pub mod arith;
pub mod builtins;
pub mod completion;
pub mod config;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod logging;
pub mod parser;
pub mod repl;
pub mod sequence;
pub mod session;
pub mod stats;
pub mod util;

pub use dispatch::{handle, Feature, Outcome, Request};
pub use error::CalcError;
pub use history::{History, Record, HISTORY_CAPACITY};
pub use session::Session;
