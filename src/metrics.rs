use crate::errors::StatusError;

/// Counters for a single report.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportStats {
    pub lines_read: u64,
    pub fields_set: u64,
    pub unknown_keys: u64,
    pub malformed_lines_skipped: u64,
    pub field_errors_skipped: u64,
}

impl ReportStats {
    pub fn record_line(&mut self) {
        self.lines_read += 1;
    }

    pub fn record_field_set(&mut self) {
        self.fields_set += 1;
    }

    pub fn record_unknown_key(&mut self) {
        self.unknown_keys += 1;
    }

    pub fn record_skipped(&mut self, error: &StatusError) {
        match error {
            StatusError::MalformedLine { .. } => self.malformed_lines_skipped += 1,
            StatusError::FieldParse { .. } => self.field_errors_skipped += 1,
        }
    }

    pub fn total_skipped(&self) -> u64 {
        self.malformed_lines_skipped + self.field_errors_skipped
    }

    pub fn summary(&self) -> String {
        format!(
            "{} lines, {} fields set, {} unknown keys, {} skipped ({} malformed, {} bad values)",
            self.lines_read,
            self.fields_set,
            self.unknown_keys,
            self.total_skipped(),
            self.malformed_lines_skipped,
            self.field_errors_skipped
        )
    }
}
