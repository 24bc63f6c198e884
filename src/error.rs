//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur while composing, ingesting,
//! or storing payroll records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single business-rule violation attributed to one field.
///
/// The validator collects every violation it finds rather than stopping at
/// the first one, so callers can surface one message per offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// The name of the field that violated a rule.
    pub field: String,
    /// A human-readable description of the violation.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation for the given field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::Schema {
///     column: "net_salary".to_string(),
/// };
/// assert_eq!(error.to_string(), "Batch file is missing required column 'net_salary'");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// A date, time, or number could not be parsed.
    #[error("Could not parse {field} from '{value}'")]
    Parse {
        /// The field whose value failed to parse.
        field: String,
        /// The offending input text.
        value: String,
    },

    /// One or more business-rule violations, collected together.
    #[error("Validation failed with {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// A record for this employee and date already exists.
    #[error("A payroll entry for employee {employee_id} on {date} already exists")]
    DuplicateEntry {
        /// The employee the duplicate targets.
        employee_id: u64,
        /// The work date of the duplicate.
        date: NaiveDate,
    },

    /// The batch file header is missing a required column.
    #[error("Batch file is missing required column '{column}'")]
    Schema {
        /// The first required column that was not found.
        column: String,
    },

    /// An operation referenced an employee id that does not exist.
    #[error("Row {row}: employee {employee_id} not found")]
    EmployeeNotFound {
        /// The unresolvable employee id.
        employee_id: u64,
        /// The 1-based data row the id appeared on; zero outside batch
        /// ingestion.
        row: usize,
    },

    /// The requested payroll record does not exist.
    #[error("Payroll record {id} not found")]
    NotFound {
        /// The id that was requested.
        id: u64,
    },

    /// The underlying persistence layer failed.
    #[error("Storage failure: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl PayrollError {
    /// Convenience constructor for a parse failure.
    pub fn parse(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Parse {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
