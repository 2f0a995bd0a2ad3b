use crate::errors::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

pub const MALFORMED_LINE_ENV: &str = "NIS_ON_MALFORMED_LINE";
pub const FIELD_ERROR_ENV: &str = "NIS_ON_FIELD_ERROR";

/// What the report driver does with a line it cannot apply.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Log the error and continue with the next line.
    Skip,
}

impl ErrorPolicy {
    fn from_setting(name: &str, value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            _ => Err(ConfigError::InvalidPolicy {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Caller policy for [`crate::parse_report_with`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ReportOptions {
    pub on_malformed_line: ErrorPolicy,
    pub on_field_error: ErrorPolicy,
}

impl ReportOptions {
    /// Defaults overridden by `NIS_ON_MALFORMED_LINE` / `NIS_ON_FIELD_ERROR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut options = Self::default();

        if let Ok(value) = std::env::var(MALFORMED_LINE_ENV) {
            options.on_malformed_line = ErrorPolicy::from_setting(MALFORMED_LINE_ENV, &value)?;
        }

        if let Ok(value) = std::env::var(FIELD_ERROR_ENV) {
            options.on_field_error = ErrorPolicy::from_setting(FIELD_ERROR_ENV, &value)?;
        }

        Ok(options)
    }
}

/// Loads report options from a JSON file. Missing keys take their defaults.
pub fn load_options(path_str: &str) -> Result<ReportOptions, ConfigError> {
    let path = PathBuf::from(path_str);
    if !path.exists() {
        return Err(ConfigError::NotFound { path });
    }

    let file = File::open(&path).map_err(|e| ConfigError::IoError {
        path: path.clone(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let options: ReportOptions =
        serde_json::from_reader(reader).map_err(|e| ConfigError::JsonParseError {
            path: path.clone(),
            source: e,
        })?;

    debug!("Loaded report options from {}: {:?}", path.display(), options);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_options() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"on_malformed_line": "skip"}}"#).unwrap();

        let options = load_options(file.path().to_str().unwrap()).unwrap();
        assert_eq!(options.on_malformed_line, ErrorPolicy::Skip);
        assert_eq!(options.on_field_error, ErrorPolicy::Abort);
    }

    #[test]
    fn test_load_options_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nis.json");
        match load_options(missing.to_str().unwrap()) {
            Err(ConfigError::NotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_options_rejects_unknown_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"on_field_error": "retry"}}"#).unwrap();

        assert!(matches!(
            load_options(file.path().to_str().unwrap()),
            Err(ConfigError::JsonParseError { .. })
        ));
    }

    #[test]
    fn test_policy_from_setting() {
        assert!(matches!(
            ErrorPolicy::from_setting("X", " Skip "),
            Ok(ErrorPolicy::Skip)
        ));
        assert!(matches!(
            ErrorPolicy::from_setting("X", "ignore"),
            Err(ConfigError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(MALFORMED_LINE_ENV, "skip");
        std::env::remove_var(FIELD_ERROR_ENV);
        let options = ReportOptions::from_env().unwrap();
        std::env::remove_var(MALFORMED_LINE_ENV);

        assert_eq!(options.on_malformed_line, ErrorPolicy::Skip);
        assert_eq!(options.on_field_error, ErrorPolicy::Abort);
    }
}
