//! Wall-clock time handling and lateness.
//!
//! Punch-in times are stored as zero-padded `HH:MM:SS` strings and compared
//! against the late threshold lexicographically. For zero-padded 24-hour
//! strings this orders the same way as the clock, and it is the comparison
//! existing attendance data was produced with.

use chrono::{NaiveDateTime, NaiveTime};

use crate::models::AttendanceStatus;

/// Default late threshold. A punch-in strictly after this is late.
pub const DEFAULT_LATE_AFTER: &str = "09:30:00";

/// Default time punch-out opens.
pub const DEFAULT_PUNCH_OUT_AFTER: &str = "18:30";

/// Parses `HH:MM:SS` or `HH:MM`.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::parse_wall_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_wall_time("18:30"), NaiveTime::from_hms_opt(18, 30, 0));
/// assert_eq!(parse_wall_time("09:30:01"), NaiveTime::from_hms_opt(9, 30, 1));
/// assert_eq!(parse_wall_time("25:00"), None);
/// ```
pub fn parse_wall_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Formats a time as zero-padded 24-hour `HH:MM:SS`.
pub fn format_wall_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// The punch-in time string for a local datetime.
pub fn punch_time(now: NaiveDateTime) -> String {
    format_wall_time(now.time())
}

/// Formats a time for user-facing messages, e.g. "6:30 PM".
pub fn describe_wall_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Returns true if `time` is strictly later than `late_after`.
///
/// This is a string comparison, not a numeric one: `"09:30:00"` is on time
/// and `"09:30:01"` is late.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::is_late;
///
/// assert!(!is_late("09:30:00", "09:30:00"));
/// assert!(is_late("09:30:01", "09:30:00"));
/// ```
pub fn is_late(time: &str, late_after: &str) -> bool {
    time > late_after
}

/// The stored status for a fresh punch-in at `time`.
pub fn punch_in_status(time: &str, late_after: &str) -> AttendanceStatus {
    if is_late(time, late_after) {
        AttendanceStatus::PresentLate
    } else {
        AttendanceStatus::Present
    }
}
