//! Attendance evaluation.
//!
//! This module holds the pure attendance rules: lateness, the punch-in and
//! punch-out gates, record construction, day status derivation,
//! regularization validation and resolution, and range summaries.
//! [`AttendanceEvaluator`] binds them to a configured policy.

mod day_status;
mod evaluator;
mod lateness;
mod punch_gate;
mod record_builder;
mod regularization;
mod summary;

pub use day_status::{day_status, derive_today_status, is_first_login_of_day, status_of_record};
pub use evaluator::AttendanceEvaluator;
pub use lateness::{
    DEFAULT_LATE_AFTER, DEFAULT_PUNCH_OUT_AFTER, describe_wall_time, format_wall_time, is_late,
    parse_wall_time, punch_in_status, punch_time,
};
pub use punch_gate::{
    can_punch_in, check_punch_in, check_punch_out, has_punched_in_today, is_punch_out_allowed,
};
pub use record_builder::build_attendance_record;
pub use regularization::{resolve_regularization, validate_regularization};
pub use summary::{MAX_SUMMARY_DAYS, mark_for_day, summarize};
