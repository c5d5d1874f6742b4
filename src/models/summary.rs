//! Attendance summary models.
//!
//! A summary covers an inclusive date range and carries one [`DayAttendance`]
//! per date plus running totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a single day is marked on the attendance calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMark {
    /// On time with a punch-out.
    Complete,
    /// On time but no punch-out recorded.
    MissingPunchOut,
    /// Punched in late.
    Late,
    /// No record for a past day, or marked absent.
    Absent,
    /// Covered by an approved regularization.
    Regularized,
    /// Today, not yet punched in.
    Pending,
    /// After today.
    Upcoming,
}

/// One day in a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAttendance {
    /// The calendar date.
    pub date: NaiveDate,
    /// The calendar mark.
    pub mark: DayMark,
    /// Punch-in time, if a record exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Punch-out time, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logout_time: Option<String>,
}

/// Day counts over a summary range.
///
/// `present` counts on-time days only; late days are counted separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTotals {
    /// On-time days (with or without punch-out).
    pub present: u32,
    /// Late days.
    pub late: u32,
    /// Absent days.
    pub absent: u32,
    /// Regularized days.
    pub regularized: u32,
}

impl AttendanceTotals {
    /// Adds one day's mark to the totals.
    pub fn add(&mut self, mark: DayMark) {
        match mark {
            DayMark::Complete | DayMark::MissingPunchOut => self.present += 1,
            DayMark::Late => self.late += 1,
            DayMark::Absent => self.absent += 1,
            DayMark::Regularized => self.regularized += 1,
            DayMark::Pending | DayMark::Upcoming => {}
        }
    }

    /// Days that count as attended.
    pub fn attended(&self) -> u32 {
        self.present + self.late + self.regularized
    }
}

/// Attendance over a date range for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee summarized.
    pub employee_code: String,
    /// First date (inclusive).
    pub from: NaiveDate,
    /// Last date (inclusive).
    pub to: NaiveDate,
    /// One entry per date, in order.
    pub days: Vec<DayAttendance>,
    /// Counts over `days`.
    pub totals: AttendanceTotals,
}
