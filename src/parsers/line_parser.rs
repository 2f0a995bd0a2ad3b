use crate::config::{ErrorPolicy, ReportOptions};
use crate::data_models::{Field, Status};
use crate::errors::StatusError;
use crate::metrics::ReportStats;
use log::{debug, trace, warn};

/// Splits a `KEY : VALUE` line on its first colon and trims both halves.
pub fn split_line(line: &str) -> Result<(&str, &str), StatusError> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
        .ok_or_else(|| StatusError::MalformedLine {
            line: line.to_string(),
        })
}

impl Status {
    /// Writes one trimmed key/value pair into the record.
    ///
    /// Returns `Ok(false)` for keys the record does not model; those are
    /// ignored. A recognized key with a bad value fails without changing
    /// the record.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool, StatusError> {
        let Some(field) = Field::from_key(key) else {
            trace!("Ignoring unknown key '{}'", key);
            return Ok(false);
        };

        self.store(field, value)
            .map_err(|source| StatusError::FieldParse {
                key: key.to_string(),
                value: value.to_string(),
                source,
            })?;
        Ok(true)
    }
}

// Returns whether the line set a field.
fn dispatch_line(status: &mut Status, line: &str) -> Result<bool, StatusError> {
    let (key, value) = split_line(line)?;
    status.apply(key, value)
}

/// Applies one report line to `status`.
pub fn parse_line(status: &mut Status, line: &str) -> Result<(), StatusError> {
    dispatch_line(status, line).map(|_| ())
}

/// Builds a record from a whole report, stopping at the first bad line.
pub fn parse_report<I, S>(lines: I) -> Result<Status, StatusError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_report_with(lines, &ReportOptions::default()).map(|(status, _)| status)
}

/// Builds a record from a whole report, handling bad lines according to `options`.
pub fn parse_report_with<I, S>(
    lines: I,
    options: &ReportOptions,
) -> Result<(Status, ReportStats), StatusError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut status = Status::default();
    let mut stats = ReportStats::default();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let line_num = index + 1;
        stats.record_line();

        match dispatch_line(&mut status, line) {
            Ok(true) => stats.record_field_set(),
            Ok(false) => stats.record_unknown_key(),
            Err(e) => {
                let policy = match e {
                    StatusError::MalformedLine { .. } => options.on_malformed_line,
                    StatusError::FieldParse { .. } => options.on_field_error,
                };
                match policy {
                    ErrorPolicy::Abort => {
                        debug!("Aborting report at line {}: {}", line_num, e);
                        return Err(e);
                    }
                    ErrorPolicy::Skip => {
                        warn!("Skipping line {}: {}", line_num, e);
                        stats.record_skipped(&e);
                    }
                }
            }
        }
    }

    debug!("Finished report: {}", stats.summary());
    Ok((status, stats))
}
