//! Day status derivation.
//!
//! A day's status comes from its record when one exists. Without a record,
//! today is "not punched in yet", earlier days are absent and later days are
//! upcoming.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{AttendanceHistory, AttendanceRecord, AttendanceStatus, DayStatus};

use super::lateness::is_late;

/// Derives the status a record stands for.
///
/// Regularized and absent records keep their stored status; any other record
/// is re-derived from its punch-in time, so a record is late exactly when its
/// time is strictly after `late_after`.
pub fn status_of_record(record: &AttendanceRecord, late_after: &str) -> DayStatus {
    match record.status {
        AttendanceStatus::Regularized => DayStatus::Regularized,
        AttendanceStatus::Absent => DayStatus::Absent,
        AttendanceStatus::Present | AttendanceStatus::PresentLate => {
            if is_late(&record.time, late_after) {
                DayStatus::PresentLate
            } else {
                DayStatus::Present
            }
        }
    }
}

/// Derives today's status from an employee's history.
///
/// Returns [`DayStatus::NotPunchedIn`] when there is no record for today;
/// never returns `Absent` for a missing record.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::derive_today_status;
/// use attendance_engine::models::{AttendanceHistory, DayStatus};
/// use chrono::NaiveDateTime;
///
/// let now = NaiveDateTime::parse_from_str("2024-01-01 09:15:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(
///     derive_today_status(&AttendanceHistory::new(), now, "09:30:00"),
///     DayStatus::NotPunchedIn
/// );
/// ```
pub fn derive_today_status(
    records: &AttendanceHistory,
    now: NaiveDateTime,
    late_after: &str,
) -> DayStatus {
    match records.get(&now.date()) {
        Some(record) => status_of_record(record, late_after),
        None => DayStatus::NotPunchedIn,
    }
}

/// Derives the status of any date relative to `today`.
pub fn day_status(
    records: &AttendanceHistory,
    date: NaiveDate,
    today: NaiveDate,
    late_after: &str,
) -> DayStatus {
    match records.get(&date) {
        Some(record) => status_of_record(record, late_after),
        None if date < today => DayStatus::Absent,
        None if date == today => DayStatus::NotPunchedIn,
        None => DayStatus::Upcoming,
    }
}

/// Returns true when the employee has no record yet for today.
pub fn is_first_login_of_day(records: &AttendanceHistory, now: NaiveDateTime) -> bool {
    !records.contains_key(&now.date())
}
