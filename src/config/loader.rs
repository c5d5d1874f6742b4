//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading attendance
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveTime;

use crate::error::{AttendanceError, AttendanceResult};
use crate::evaluation::parse_wall_time;

use super::types::{AttendanceConfig, AttendancePolicy, PolicyFile, RosterFile, SeedEmployee};

/// Loads and provides access to attendance configuration.
///
/// # Directory Structure
///
/// ```text
/// config/attendance/
/// ├── policy.yaml     # Late and punch-out thresholds, regularization settings
/// └── employees.yaml  # Optional seed roster
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance").unwrap();
/// println!("Late after {}", loader.policy().late_after());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AttendanceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `policy.yaml` is missing or malformed, if a
    /// threshold is not a valid wall-clock time, or if `employees.yaml`
    /// exists but cannot be parsed or repeats an employee code.
    pub fn load<P: AsRef<Path>>(path: P) -> AttendanceResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy_file = Self::load_yaml::<PolicyFile>(&policy_path)?;
        let policy = Self::validate_policy(policy_file)?;

        let roster_path = path.join("employees.yaml");
        let roster = if roster_path.exists() {
            Self::load_yaml::<RosterFile>(&roster_path)?.employees
        } else {
            Vec::new()
        };
        Self::validate_roster(&roster)?;

        Ok(Self {
            config: AttendanceConfig::new(policy, roster),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AttendanceConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AttendanceResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AttendanceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| AttendanceError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_policy(file: PolicyFile) -> AttendanceResult<AttendancePolicy> {
        let late_after = Self::parse_threshold("late_after", &file.late_after)?;
        let punch_out_after = Self::parse_threshold("punch_out_after", &file.punch_out_after)?;

        if file.regularization.placeholder_address.trim().is_empty() {
            return Err(AttendanceError::InvalidConfig {
                field: "regularization.placeholder_address".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(AttendancePolicy::new(late_after, punch_out_after)
            .with_placeholder_address(file.regularization.placeholder_address)
            .with_unique_pending(file.regularization.unique_pending))
    }

    fn parse_threshold(field: &str, value: &str) -> AttendanceResult<NaiveTime> {
        parse_wall_time(value).ok_or_else(|| AttendanceError::InvalidConfig {
            field: field.to_string(),
            message: format!("'{}' is not a HH:MM or HH:MM:SS time", value),
        })
    }

    fn validate_roster(roster: &[SeedEmployee]) -> AttendanceResult<()> {
        let mut seen = std::collections::HashSet::new();
        for employee in roster {
            if employee.employee_code.trim().is_empty() {
                return Err(AttendanceError::InvalidConfig {
                    field: "employees.employee_code".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            if !seen.insert(employee.employee_code.as_str()) {
                return Err(AttendanceError::InvalidConfig {
                    field: "employees.employee_code".to_string(),
                    message: format!("duplicate code '{}'", employee.employee_code),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AttendanceConfig {
        &self.config
    }

    /// Returns the attendance policy.
    pub fn policy(&self) -> &AttendancePolicy {
        self.config.policy()
    }

    /// Returns the seed roster.
    pub fn roster(&self) -> &[SeedEmployee] {
        self.config.roster()
    }
}
