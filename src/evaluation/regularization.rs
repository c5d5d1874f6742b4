//! Regularization validation and resolution.
//!
//! Resolution is a pure computation: it decides what the store should do
//! and the caller applies it in one atomic call.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{
    AttendanceHistory, AttendanceRecord, AttendanceStatus, GeoLocation, RegularizationAction,
    RegularizationDraft, RegularizationRequest, RegularizationStatus, Resolution,
};

use super::lateness::parse_wall_time;

/// Checks whether an employee may submit `draft`.
///
/// A draft is valid when the reason is not blank, both times parse and the
/// logout is after the login, the date is not after `today`, the day is not
/// already regularized and, when `unique_pending` is set, no pending request
/// exists for the same employee and date.
pub fn validate_regularization(
    employee_code: &str,
    draft: &RegularizationDraft,
    records: &AttendanceHistory,
    pending: &[RegularizationRequest],
    today: NaiveDate,
    unique_pending: bool,
) -> AttendanceResult<()> {
    if draft.reason.trim().is_empty() {
        return Err(invalid("reason", "must not be empty"));
    }

    let login = parse_wall_time(&draft.login_time)
        .ok_or_else(|| invalid("login_time", "must be HH:MM or HH:MM:SS"))?;
    let logout = parse_wall_time(&draft.logout_time)
        .ok_or_else(|| invalid("logout_time", "must be HH:MM or HH:MM:SS"))?;
    if logout <= login {
        return Err(invalid("logout_time", "must be after login_time"));
    }

    if draft.date > today {
        return Err(invalid("date", "cannot be in the future"));
    }

    if records
        .get(&draft.date)
        .is_some_and(|r| r.status == AttendanceStatus::Regularized)
    {
        return Err(invalid("date", "is already regularized"));
    }

    if unique_pending
        && pending.iter().any(|r| {
            r.employee_code == employee_code
                && r.date == draft.date
                && r.status == RegularizationStatus::Pending
        })
    {
        return Err(AttendanceError::DuplicateRegularization {
            code: employee_code.to_string(),
            date: draft.date,
        });
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> AttendanceError {
    AttendanceError::InvalidRegularization {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Computes the outcome of an administrator's decision.
///
/// Rejection changes no attendance. Approval synthesizes a `Regularized`
/// record for the request's date from the claimed times, with an empty photo
/// and IP and a zeroed placeholder location; it never fails for lack of a
/// live capture. Both outcomes delete the request.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::resolve_regularization;
/// use attendance_engine::models::{
///     AttendanceStatus, RegularizationAction, RegularizationDraft, RegularizationRequest,
/// };
/// use chrono::{DateTime, NaiveDate};
///
/// let now = DateTime::parse_from_rfc3339("2024-01-03T11:00:00+05:30").unwrap();
/// let request = RegularizationRequest::pending(
///     "39466",
///     RegularizationDraft {
///         date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///         login_time: "09:00".into(),
///         logout_time: "18:30".into(),
///         reason: "Camera failed".into(),
///     },
///     now,
/// );
///
/// let resolution = resolve_regularization(&request, RegularizationAction::Approve, now, "Regularized");
/// let record = resolution.record().unwrap();
/// assert_eq!(record.status, AttendanceStatus::Regularized);
/// assert_eq!(record.time, "09:00");
/// assert_eq!(record.logout_time.as_deref(), Some("18:30"));
/// ```
pub fn resolve_regularization(
    request: &RegularizationRequest,
    action: RegularizationAction,
    now: DateTime<FixedOffset>,
    placeholder_address: &str,
) -> Resolution {
    match action {
        RegularizationAction::Reject => Resolution::Rejected,
        RegularizationAction::Approve => Resolution::Approved(AttendanceRecord {
            employee_code: request.employee_code.clone(),
            date: request.date,
            time: request.login_time.clone(),
            logout_time: Some(request.logout_time.clone()),
            status: AttendanceStatus::Regularized,
            location: GeoLocation::placeholder(placeholder_address),
            photo: String::new(),
            ip_address: String::new(),
            timestamp: now,
        }),
    }
}
