//! Employee model.
//!
//! This module defines the [`Employee`] identity record. The credential is
//! owned by the auth provider and never stored here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attendance::{AttendanceHistory, AttendanceRecord};

/// An employee and the attendance records they own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Internal identifier.
    pub id: Uuid,
    /// Human-readable code used for login and lookup (e.g., "39466").
    pub employee_code: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Whether the employee may administer attendance.
    #[serde(default)]
    pub is_admin: bool,
    /// When the employee was created.
    pub created_at: DateTime<Utc>,
    /// Attendance records keyed by calendar date.
    #[serde(default)]
    pub attendance: AttendanceHistory,
}

impl Employee {
    /// Creates an employee with an empty attendance history.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    /// use chrono::Utc;
    ///
    /// let employee = Employee::new("39466", "Aditya", "aditya@example.com", false, Utc::now());
    /// assert_eq!(employee.employee_code, "39466");
    /// assert!(employee.attendance.is_empty());
    /// ```
    pub fn new(
        employee_code: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        is_admin: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_code: employee_code.into(),
            name: name.into(),
            email: email.into(),
            is_admin,
            created_at,
            attendance: AttendanceHistory::new(),
        }
    }

    /// Returns the record for a date, if any.
    pub fn record_on(&self, date: chrono::NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance.get(&date)
    }
}

/// Details for registering a new employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Human-readable code used for login.
    pub employee_code: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Initial password, handed to the auth provider.
    pub password: String,
    /// Whether the employee may administer attendance.
    #[serde(default)]
    pub is_admin: bool,
}
