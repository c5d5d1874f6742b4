//! Punch-in and punch-out gating.
//!
//! Punch-in is allowed once per calendar day. Punch-out is gated twice and
//! the two checks are independent: the employee must have punched in today,
//! and the local time must be at or after the configured opening time.

use chrono::{NaiveDateTime, NaiveTime, Timelike};

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::AttendanceHistory;

use super::lateness::describe_wall_time;

/// Returns true if punch-out is open at `now`.
///
/// Compares hour and minute only: with an 18:30 opening time this is
/// `hour > 18 || (hour == 18 && minute >= 30)`.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::is_punch_out_allowed;
/// use chrono::{NaiveDateTime, NaiveTime};
///
/// let opens_at = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
/// let early = NaiveDateTime::parse_from_str("2024-01-01 18:29:59", "%Y-%m-%d %H:%M:%S").unwrap();
/// let open = NaiveDateTime::parse_from_str("2024-01-01 18:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert!(!is_punch_out_allowed(early, opens_at));
/// assert!(is_punch_out_allowed(open, opens_at));
/// ```
pub fn is_punch_out_allowed(now: NaiveDateTime, opens_at: NaiveTime) -> bool {
    (now.hour(), now.minute()) >= (opens_at.hour(), opens_at.minute())
}

/// Returns true if a record already exists for `now`'s date.
pub fn has_punched_in_today(records: &AttendanceHistory, now: NaiveDateTime) -> bool {
    records.contains_key(&now.date())
}

/// Returns false once the employee has punched in today.
pub fn can_punch_in(already_punched_in_today: bool) -> bool {
    !already_punched_in_today
}

/// Checks that a punch-in at `now` would be the first of the day.
pub fn check_punch_in(
    employee_code: &str,
    records: &AttendanceHistory,
    now: NaiveDateTime,
) -> AttendanceResult<()> {
    if can_punch_in(has_punched_in_today(records, now)) {
        Ok(())
    } else {
        Err(AttendanceError::AlreadyPunchedIn {
            code: employee_code.to_string(),
            date: now.date(),
        })
    }
}

/// Checks that a punch-out at `now` may be persisted.
///
/// Fails with `NotPunchedIn` when there is no record for today,
/// `AlreadyPunchedOut` when one was already recorded, and
/// `PunchOutTooEarly` before the opening time.
pub fn check_punch_out(
    employee_code: &str,
    records: &AttendanceHistory,
    now: NaiveDateTime,
    opens_at: NaiveTime,
) -> AttendanceResult<()> {
    let date = now.date();
    let record = records
        .get(&date)
        .ok_or_else(|| AttendanceError::NotPunchedIn {
            code: employee_code.to_string(),
            date,
        })?;

    if record.has_punched_out() {
        return Err(AttendanceError::AlreadyPunchedOut {
            code: employee_code.to_string(),
            date,
        });
    }

    if !is_punch_out_allowed(now, opens_at) {
        return Err(AttendanceError::PunchOutTooEarly {
            opens_at: describe_wall_time(opens_at),
        });
    }

    Ok(())
}
