use std::io;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading options file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse JSON options in {path}: {source}")]
    JsonParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Options file not found at {path}")]
    NotFound { path: PathBuf },
    #[error("Invalid value '{value}' for {name}: expected 'abort' or 'skip'")]
    InvalidPolicy { name: String, value: String },
}

/// Failure to convert a raw report value into its field's type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("can't parse number '{value}': {source}")]
    NumericFormat {
        value: String,
        #[source]
        source: ParseFloatError,
    },
    /// Integer counters (`NUMXFERS`, `NOMPOWER`, ...): the integer case of a numeric format error.
    #[error("can't parse integer '{value}': {source}")]
    IntegerFormat {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("can't parse time: {value:?} (expected format '{format}')")]
    TimeFormat {
        value: String,
        format: &'static str,
        /// `None` when the value was rejected before reaching chrono.
        #[source]
        source: Option<chrono::ParseError>,
    },
    #[error("invalid time duration {value:?}: {reason}")]
    DurationFormat { value: String, reason: String },
}

impl ValueError {
    pub(crate) fn duration(value: &str, reason: impl Into<String>) -> Self {
        ValueError::DurationFormat {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatusError {
    #[error("invalid key/value pair: {line:?}")]
    MalformedLine { line: String },
    #[error("Parsing failed for key '{key}' with value {value:?}: {source}")]
    FieldParse {
        key: String,
        value: String,
        #[source]
        source: ValueError,
    },
}
