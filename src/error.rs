// error.rs

use thiserror::Error;

/// Faults raised while handling a request. Undefined math is not a fault:
/// the engine reports it as `None` and the record is still logged.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("{feature}: missing parameter '{param}'")]
    MissingParam { feature: &'static str, param: &'static str },

    #[error("{param}: '{value}' is not a valid number")]
    InvalidNumber { param: String, value: String },

    #[error("{0}: unknown feature")]
    UnknownFeature(String),

    #[error("{feature}: unknown operation '{op}'")]
    UnknownOperation { feature: &'static str, op: String },

    #[error("{param}: {value} exceeds the limit of {limit}")]
    TooLarge { param: &'static str, value: i64, limit: usize },

    #[error("{param}: 'ans' has no numeric result to refer to")]
    NoPreviousResult { param: String },

    #[error("malformed argument '{0}', expected key=value")]
    MalformedArgument(String),

    #[error("export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("export produced invalid utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;
