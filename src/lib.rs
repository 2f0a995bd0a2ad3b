//! Typed parser for the `KEY : VALUE` status report served by a UPS
//! network information server (NIS).
//!
//! Feed report lines to [`parse_line`] or a whole report to
//! [`parse_report`]; the result is a [`Status`] record. Keys the record does
//! not model are ignored, known keys with bad values are errors.

pub mod config;
pub mod data_models;
pub mod errors;
pub mod metrics;
pub mod parsers;

pub use config::{load_options, ErrorPolicy, ReportOptions};
pub use data_models::{Field, Status, Value, ValueKind};
pub use errors::{ConfigError, StatusError, ValueError};
pub use metrics::ReportStats;
pub use parsers::line_parser::{parse_line, parse_report, parse_report_with, split_line};
