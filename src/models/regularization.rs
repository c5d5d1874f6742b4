//! Regularization request models.
//!
//! A [`RegularizationRequest`] asks an administrator to correct a missing or
//! wrong attendance day. Requests move from `Pending` to `Approved` or
//! `Rejected`; both outcomes remove the request.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attendance::AttendanceRecord;

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegularizationStatus {
    /// Awaiting an administrator.
    Pending,
    /// Approved; the request is deleted once the record is written.
    Approved,
    /// Rejected; the request is deleted.
    Rejected,
}

impl RegularizationStatus {
    /// Returns true for `Approved` and `Rejected`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RegularizationStatus::Pending)
    }
}

/// A submitted correction for one employee and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularizationRequest {
    /// Request identifier.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_code: String,
    /// The day to correct.
    pub date: NaiveDate,
    /// Claimed login time (`HH:MM` or `HH:MM:SS`).
    pub login_time: String,
    /// Claimed logout time (`HH:MM` or `HH:MM:SS`).
    pub logout_time: String,
    /// Free-text justification.
    pub reason: String,
    /// Current state.
    pub status: RegularizationStatus,
    /// When the request was submitted.
    pub submitted_at: DateTime<FixedOffset>,
}

impl RegularizationRequest {
    /// Creates a pending request from a draft.
    pub fn pending(
        employee_code: impl Into<String>,
        draft: RegularizationDraft,
        submitted_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_code: employee_code.into(),
            date: draft.date,
            login_time: draft.login_time,
            logout_time: draft.logout_time,
            reason: draft.reason,
            status: RegularizationStatus::Pending,
            submitted_at,
        }
    }
}

/// The fields an employee fills in to request a correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularizationDraft {
    /// The day to correct.
    pub date: NaiveDate,
    /// Claimed login time.
    #[serde(default = "default_login_time")]
    pub login_time: String,
    /// Claimed logout time.
    #[serde(default = "default_logout_time")]
    pub logout_time: String,
    /// Free-text justification.
    pub reason: String,
}

fn default_login_time() -> String {
    "09:30".to_string()
}

fn default_logout_time() -> String {
    "18:30".to_string()
}

/// An administrator's decision on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegularizationAction {
    /// Accept the claimed times.
    Approve,
    /// Discard the request.
    Reject,
}

/// What resolving a request does to the store.
///
/// Both variants delete the request; only approval writes a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Write this record for the request's date, then delete the request.
    Approved(AttendanceRecord),
    /// Delete the request without touching attendance.
    Rejected,
}

impl Resolution {
    /// The record to write, if any.
    pub fn record(&self) -> Option<&AttendanceRecord> {
        match self {
            Resolution::Approved(record) => Some(record),
            Resolution::Rejected => None,
        }
    }

    /// Consumes the resolution, returning the record to write, if any.
    pub fn into_record(self) -> Option<AttendanceRecord> {
        match self {
            Resolution::Approved(record) => Some(record),
            Resolution::Rejected => None,
        }
    }

    /// Every resolution removes the request entity.
    pub fn deletes_request(&self) -> bool {
        true
    }

    /// The terminal status the request reached.
    pub fn status(&self) -> RegularizationStatus {
        match self {
            Resolution::Approved(_) => RegularizationStatus::Approved,
            Resolution::Rejected => RegularizationStatus::Rejected,
        }
    }
}
