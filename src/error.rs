//! Error types for the salary engine.
//!
//! The calculators themselves are total functions and never fail; these
//! errors cover configuration loading, rate table selection and the
//! request validation performed by callers before a calculation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the salary engine.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rates".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate table parsed correctly but is internally inconsistent.
    #[error("Invalid rate table: {message}")]
    InvalidRateTable {
        /// A description of the inconsistency.
        message: String,
    },

    /// No loaded rate table is in effect on the requested date.
    #[error("No rate table in effect on {date}")]
    RateTableNotFound {
        /// The date for which a table was requested.
        date: NaiveDate,
    },

    /// A salary request failed caller-side validation.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rates".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rates"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_rate_table_displays_message() {
        let error = EngineError::InvalidRateTable {
            message: "tax brackets are empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rate table: tax brackets are empty"
        );
    }

    #[test]
    fn test_rate_table_not_found_displays_date() {
        let error = EngineError::RateTableNotFound {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        assert_eq!(error.to_string(), "No rate table in effect on 2020-01-01");
    }

    #[test]
    fn test_invalid_request_displays_field_and_message() {
        let error = EngineError::InvalidRequest {
            field: "exchange_rate".to_string(),
            message: "required for foreign currency".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid request field 'exchange_rate': required for foreign currency"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
