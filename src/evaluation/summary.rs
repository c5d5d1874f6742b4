//! Attendance summaries over a date range.

use chrono::NaiveDate;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{
    AttendanceHistory, AttendanceSummary, AttendanceTotals, DayAttendance, DayMark, DayStatus,
};

use super::day_status::day_status;

/// Longest range a single summary may cover, in days.
pub const MAX_SUMMARY_DAYS: i64 = 366;

/// Marks one day for the attendance calendar.
///
/// On-time days split on whether a punch-out was recorded. Today without a
/// record is `Pending`, not `Absent`.
pub fn mark_for_day(
    records: &AttendanceHistory,
    date: NaiveDate,
    today: NaiveDate,
    late_after: &str,
) -> DayMark {
    match day_status(records, date, today, late_after) {
        DayStatus::Present => {
            if records.get(&date).is_some_and(|r| r.has_punched_out()) {
                DayMark::Complete
            } else {
                DayMark::MissingPunchOut
            }
        }
        DayStatus::PresentLate => DayMark::Late,
        DayStatus::Absent => DayMark::Absent,
        DayStatus::Regularized => DayMark::Regularized,
        DayStatus::NotPunchedIn => DayMark::Pending,
        DayStatus::Upcoming => DayMark::Upcoming,
    }
}

/// Summarizes an employee's attendance from `from` to `to`, inclusive.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::summarize;
/// use attendance_engine::models::AttendanceHistory;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
///
/// let summary = summarize("39466", &AttendanceHistory::new(), from, to, today, "09:30:00").unwrap();
/// assert_eq!(summary.days.len(), 5);
/// assert_eq!(summary.totals.absent, 3);
/// ```
pub fn summarize(
    employee_code: &str,
    records: &AttendanceHistory,
    from: NaiveDate,
    to: NaiveDate,
    today: NaiveDate,
    late_after: &str,
) -> AttendanceResult<AttendanceSummary> {
    if from > to {
        return Err(AttendanceError::InvalidDateRange {
            from,
            to,
            message: "start is after end".to_string(),
        });
    }
    if (to - from).num_days() >= MAX_SUMMARY_DAYS {
        return Err(AttendanceError::InvalidDateRange {
            from,
            to,
            message: format!("range exceeds {} days", MAX_SUMMARY_DAYS),
        });
    }

    let mut totals = AttendanceTotals::default();
    let days: Vec<DayAttendance> = from
        .iter_days()
        .take_while(|date| *date <= to)
        .map(|date| {
            let mark = mark_for_day(records, date, today, late_after);
            totals.add(mark);
            let record = records.get(&date);
            DayAttendance {
                date,
                mark,
                time: record.map(|r| r.time.clone()),
                logout_time: record.and_then(|r| r.logout_time.clone()),
            }
        })
        .collect();

    Ok(AttendanceSummary {
        employee_code: employee_code.to_string(),
        from,
        to,
        days,
        totals,
    })
}
