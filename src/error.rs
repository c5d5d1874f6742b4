//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every outcome a caller has to tell apart: missing employees, rejected
//! credentials, punch gating, regularization problems and configuration
//! failures. Store and auth backend failures are carried through untouched.

use chrono::NaiveDate;
use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::AttendanceError;
///
/// let error = AttendanceError::EmployeeNotFound {
///     code: "39466".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: 39466");
/// ```
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Configuration file was not found at the specified path.
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

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// No employee carries the given employee code.
    #[error("Employee not found: {code}")]
    EmployeeNotFound {
        /// The employee code that was looked up.
        code: String,
    },

    /// An employee with this code already exists.
    #[error("Employee already exists: {code}")]
    EmployeeExists {
        /// The duplicate employee code.
        code: String,
    },

    /// New employee details failed validation.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The auth provider rejected the credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The caller presented no session, or an expired one.
    #[error("Authentication required")]
    Unauthenticated,

    /// The caller is authenticated but not allowed to perform the operation.
    #[error("Employee '{code}' is not permitted to {action}")]
    Forbidden {
        /// The caller's employee code.
        code: String,
        /// The attempted action.
        action: String,
    },

    /// A record already exists for the employee on that date.
    #[error("Employee '{code}' has already punched in on {date}")]
    AlreadyPunchedIn {
        /// The employee code.
        code: String,
        /// The calendar date.
        date: NaiveDate,
    },

    /// Punch-out attempted without a punch-in for the day.
    #[error("Employee '{code}' has not punched in on {date}")]
    NotPunchedIn {
        /// The employee code.
        code: String,
        /// The calendar date.
        date: NaiveDate,
    },

    /// Punch-out already recorded for the day.
    #[error("Employee '{code}' has already punched out on {date}")]
    AlreadyPunchedOut {
        /// The employee code.
        code: String,
        /// The calendar date.
        date: NaiveDate,
    },

    /// Punch-out attempted before the configured opening time.
    #[error("You can only punch out after {opens_at}")]
    PunchOutTooEarly {
        /// Human-readable opening time, e.g. "6:30 PM".
        opens_at: String,
    },

    /// No regularization request has this id.
    #[error("Regularization request not found: {id}")]
    RegularizationNotFound {
        /// The request id.
        id: String,
    },

    /// A regularization request failed validation.
    #[error("Invalid regularization request field '{field}': {message}")]
    InvalidRegularization {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A pending request already covers this employee and date.
    #[error("A regularization request for '{code}' on {date} is already pending")]
    DuplicateRegularization {
        /// The employee code.
        code: String,
        /// The calendar date.
        date: NaiveDate,
    },

    /// A summary range was reversed or too long.
    #[error("Invalid date range {from} to {to}: {message}")]
    InvalidDateRange {
        /// First day of the range.
        from: NaiveDate,
        /// Last day of the range.
        to: NaiveDate,
        /// Why the range was rejected.
        message: String,
    },

    /// Store backend failure, passed through unmodified.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Auth backend failure, passed through unmodified.
    #[error(transparent)]
    Auth(AuthError),
}

impl From<AuthError> for AttendanceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => AttendanceError::InvalidCredentials,
            AuthError::UnknownSession => AttendanceError::Unauthenticated,
            other => AttendanceError::Auth(other),
        }
    }
}

/// A type alias for Results that return AttendanceError.
pub type AttendanceResult<T> = Result<T, AttendanceError>;
