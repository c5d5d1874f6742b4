//! Attendance record construction for punch-in.

use chrono::{DateTime, FixedOffset};

use crate::models::{AttendanceRecord, GeoLocation};

use super::lateness::{punch_in_status, punch_time};

/// Builds the record for a punch-in at `now`.
///
/// The date and time are taken from `now`'s local wall clock; the status is
/// `PresentLate` when the time is strictly after `late_after`. No storage is
/// touched: the caller persists the returned value.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::build_attendance_record;
/// use attendance_engine::models::{AttendanceStatus, GeoLocation};
/// use chrono::DateTime;
///
/// let now = DateTime::parse_from_rfc3339("2024-01-01T10:00:00+05:30").unwrap();
/// let record = build_attendance_record(
///     "39466",
///     "photos/39466.jpg",
///     GeoLocation { latitude: 19.07, longitude: 72.87, address: "Mumbai".into() },
///     now,
///     "203.0.113.7",
///     "09:30:00",
/// );
/// assert_eq!(record.date.to_string(), "2024-01-01");
/// assert_eq!(record.time, "10:00:00");
/// assert_eq!(record.status, AttendanceStatus::PresentLate);
/// ```
pub fn build_attendance_record(
    employee_code: &str,
    photo: &str,
    location: GeoLocation,
    now: DateTime<FixedOffset>,
    client_ip: &str,
    late_after: &str,
) -> AttendanceRecord {
    let local = now.naive_local();
    let time = punch_time(local);
    let status = punch_in_status(&time, late_after);

    AttendanceRecord {
        employee_code: employee_code.to_string(),
        date: local.date(),
        time,
        logout_time: None,
        status,
        location,
        photo: photo.to_string(),
        ip_address: client_ip.to_string(),
        timestamp: now,
    }
}
