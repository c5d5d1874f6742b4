//! The attendance evaluator.
//!
//! [`AttendanceEvaluator`] binds the evaluation functions to one
//! [`AttendancePolicy`] and takes the current instant as the clock reports
//! it. Every method is pure; persistence belongs to the caller.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::config::AttendancePolicy;
use crate::error::AttendanceResult;
use crate::models::{
    AttendanceHistory, AttendanceRecord, AttendanceSummary, DayMark, DayStatus, GeoLocation,
    RegularizationAction, RegularizationDraft, RegularizationRequest, Resolution,
};

use super::{day_status, punch_gate, record_builder, regularization, summary};

/// Evaluates attendance against a policy.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::evaluation::AttendanceEvaluator;
/// use attendance_engine::models::{AttendanceHistory, DayStatus};
/// use chrono::DateTime;
///
/// let evaluator = AttendanceEvaluator::new(AttendancePolicy::default());
/// let now = DateTime::parse_from_rfc3339("2024-01-01T18:29:00+05:30").unwrap();
///
/// assert_eq!(
///     evaluator.derive_today_status(&AttendanceHistory::new(), now),
///     DayStatus::NotPunchedIn
/// );
/// assert!(!evaluator.is_punch_out_allowed(now));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttendanceEvaluator {
    policy: AttendancePolicy,
}

impl AttendanceEvaluator {
    /// Creates an evaluator for `policy`.
    pub fn new(policy: AttendancePolicy) -> Self {
        Self { policy }
    }

    /// The policy in force.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Today's status, or `NotPunchedIn` when there is no record for today.
    pub fn derive_today_status(
        &self,
        records: &AttendanceHistory,
        now: DateTime<FixedOffset>,
    ) -> DayStatus {
        day_status::derive_today_status(records, now.naive_local(), self.policy.late_after())
    }

    /// The status of any date relative to today.
    pub fn day_status(
        &self,
        records: &AttendanceHistory,
        date: NaiveDate,
        now: DateTime<FixedOffset>,
    ) -> DayStatus {
        day_status::day_status(
            records,
            date,
            now.naive_local().date(),
            self.policy.late_after(),
        )
    }

    /// Whether the punch-out window is open at `now`.
    pub fn is_punch_out_allowed(&self, now: DateTime<FixedOffset>) -> bool {
        punch_gate::is_punch_out_allowed(now.naive_local(), self.policy.punch_out_after())
    }

    /// Whether a punch-in is allowed given the already-punched-in flag.
    ///
    /// The flag is authoritative; `records` and `now` are accepted so callers
    /// can pass the same context they use elsewhere.
    pub fn can_punch_in(
        &self,
        _records: &AttendanceHistory,
        _now: DateTime<FixedOffset>,
        already_punched_in_today: bool,
    ) -> bool {
        punch_gate::can_punch_in(already_punched_in_today)
    }

    /// Whether the employee has a record for today.
    pub fn has_punched_in_today(
        &self,
        records: &AttendanceHistory,
        now: DateTime<FixedOffset>,
    ) -> bool {
        punch_gate::has_punched_in_today(records, now.naive_local())
    }

    /// Whether this is the employee's first login today.
    pub fn is_first_login_of_day(
        &self,
        records: &AttendanceHistory,
        now: DateTime<FixedOffset>,
    ) -> bool {
        day_status::is_first_login_of_day(records, now.naive_local())
    }

    /// Fails with `AlreadyPunchedIn` when today already has a record.
    pub fn check_punch_in(
        &self,
        employee_code: &str,
        records: &AttendanceHistory,
        now: DateTime<FixedOffset>,
    ) -> AttendanceResult<()> {
        punch_gate::check_punch_in(employee_code, records, now.naive_local())
    }

    /// Fails unless a punch-out at `now` may be persisted.
    pub fn check_punch_out(
        &self,
        employee_code: &str,
        records: &AttendanceHistory,
        now: DateTime<FixedOffset>,
    ) -> AttendanceResult<()> {
        punch_gate::check_punch_out(
            employee_code,
            records,
            now.naive_local(),
            self.policy.punch_out_after(),
        )
    }

    /// Builds the record for a punch-in at `now`.
    pub fn build_attendance_record(
        &self,
        employee_code: &str,
        photo: &str,
        location: GeoLocation,
        now: DateTime<FixedOffset>,
        client_ip: &str,
    ) -> AttendanceRecord {
        record_builder::build_attendance_record(
            employee_code,
            photo,
            location,
            now,
            client_ip,
            self.policy.late_after(),
        )
    }

    /// Validates a regularization draft before it is stored.
    pub fn validate_regularization(
        &self,
        employee_code: &str,
        draft: &RegularizationDraft,
        records: &AttendanceHistory,
        pending: &[RegularizationRequest],
        now: DateTime<FixedOffset>,
    ) -> AttendanceResult<()> {
        regularization::validate_regularization(
            employee_code,
            draft,
            records,
            pending,
            now.naive_local().date(),
            self.policy.unique_pending(),
        )
    }

    /// Computes the outcome of approving or rejecting `request`.
    pub fn resolve_regularization(
        &self,
        request: &RegularizationRequest,
        action: RegularizationAction,
        now: DateTime<FixedOffset>,
    ) -> Resolution {
        regularization::resolve_regularization(
            request,
            action,
            now,
            self.policy.placeholder_address(),
        )
    }

    /// The calendar mark for one date.
    pub fn mark_for_day(
        &self,
        records: &AttendanceHistory,
        date: NaiveDate,
        now: DateTime<FixedOffset>,
    ) -> DayMark {
        summary::mark_for_day(
            records,
            date,
            now.naive_local().date(),
            self.policy.late_after(),
        )
    }

    /// Summarizes attendance from `from` to `to`, inclusive.
    pub fn summarize(
        &self,
        employee_code: &str,
        records: &AttendanceHistory,
        from: NaiveDate,
        to: NaiveDate,
        now: DateTime<FixedOffset>,
    ) -> AttendanceResult<AttendanceSummary> {
        summary::summarize(
            employee_code,
            records,
            from,
            to,
            now.naive_local().date(),
            self.policy.late_after(),
        )
    }
}
