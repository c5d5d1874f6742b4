//! Configuration types for attendance policy.
//!
//! This module contains the raw structures deserialized from the YAML files
//! and the validated [`AttendancePolicy`] the evaluator works with.

use chrono::NaiveTime;
use serde::Deserialize;

use crate::evaluation::{DEFAULT_LATE_AFTER, DEFAULT_PUNCH_OUT_AFTER, format_wall_time, parse_wall_time};

/// Raw contents of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Punch-ins strictly later than this are late (`HH:MM` or `HH:MM:SS`).
    #[serde(default = "default_late_after")]
    pub late_after: String,
    /// Punch-out opens at this time (`HH:MM`; seconds ignored).
    #[serde(default = "default_punch_out_after")]
    pub punch_out_after: String,
    /// Regularization settings.
    #[serde(default)]
    pub regularization: RegularizationSettings,
}

fn default_late_after() -> String {
    DEFAULT_LATE_AFTER.to_string()
}

fn default_punch_out_after() -> String {
    DEFAULT_PUNCH_OUT_AFTER.to_string()
}

/// Regularization section of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegularizationSettings {
    /// Address written into the placeholder location of approved records.
    #[serde(default = "default_placeholder_address")]
    pub placeholder_address: String,
    /// Refuse a second pending request for the same employee and date.
    #[serde(default = "default_unique_pending")]
    pub unique_pending: bool,
}

impl Default for RegularizationSettings {
    fn default() -> Self {
        Self {
            placeholder_address: default_placeholder_address(),
            unique_pending: default_unique_pending(),
        }
    }
}

fn default_placeholder_address() -> String {
    "Regularized".to_string()
}

fn default_unique_pending() -> bool {
    true
}

/// One employee in the seed roster.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEmployee {
    /// Login code.
    pub employee_code: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Whether the employee is an administrator.
    #[serde(default)]
    pub is_admin: bool,
}

/// Raw contents of `employees.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterFile {
    /// Employees to create at startup.
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
}

/// Validated thresholds and settings used by the evaluator.
///
/// The late threshold is held as a zero-padded `HH:MM:SS` string so punch-in
/// times can be compared against it lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendancePolicy {
    late_after: String,
    punch_out_after: NaiveTime,
    placeholder_address: String,
    unique_pending: bool,
}

impl AttendancePolicy {
    /// Creates a policy with the given thresholds and default regularization
    /// settings.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::config::AttendancePolicy;
    /// use chrono::NaiveTime;
    ///
    /// let policy = AttendancePolicy::new(
    ///     NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
    /// );
    /// assert_eq!(policy.late_after(), "10:00:00");
    /// ```
    pub fn new(late_after: NaiveTime, punch_out_after: NaiveTime) -> Self {
        let settings = RegularizationSettings::default();
        Self {
            late_after: format_wall_time(late_after),
            punch_out_after,
            placeholder_address: settings.placeholder_address,
            unique_pending: settings.unique_pending,
        }
    }

    /// Replaces the placeholder address used for approved regularizations.
    pub fn with_placeholder_address(mut self, address: impl Into<String>) -> Self {
        self.placeholder_address = address.into();
        self
    }

    /// Sets whether duplicate pending requests are refused.
    pub fn with_unique_pending(mut self, unique_pending: bool) -> Self {
        self.unique_pending = unique_pending;
        self
    }

    /// The late threshold as `HH:MM:SS`.
    pub fn late_after(&self) -> &str {
        &self.late_after
    }

    /// The time punch-out opens.
    pub fn punch_out_after(&self) -> NaiveTime {
        self.punch_out_after
    }

    /// Address for placeholder locations on regularized records.
    pub fn placeholder_address(&self) -> &str {
        &self.placeholder_address
    }

    /// Whether a second pending request for the same day is refused.
    pub fn unique_pending(&self) -> bool {
        self.unique_pending
    }
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        // The defaults are valid literals; fall back to midnight only if the
        // constants are ever edited into something unparseable.
        let late_after = parse_wall_time(DEFAULT_LATE_AFTER).unwrap_or(NaiveTime::MIN);
        let punch_out_after = parse_wall_time(DEFAULT_PUNCH_OUT_AFTER).unwrap_or(NaiveTime::MIN);
        Self::new(late_after, punch_out_after)
    }
}

/// Everything loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct AttendanceConfig {
    policy: AttendancePolicy,
    roster: Vec<SeedEmployee>,
}

impl AttendanceConfig {
    /// Creates a configuration from its parts.
    pub fn new(policy: AttendancePolicy, roster: Vec<SeedEmployee>) -> Self {
        Self { policy, roster }
    }

    /// Returns the policy.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Returns the seed roster.
    pub fn roster(&self) -> &[SeedEmployee] {
        &self.roster
    }
}
