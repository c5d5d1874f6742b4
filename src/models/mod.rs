//! Core data models for the attendance engine.
//!
//! This module contains the domain models shared by the evaluator, the
//! collaborator traits and the HTTP API.

mod attendance;
mod employee;
mod regularization;
mod summary;

pub use attendance::{AttendanceHistory, AttendanceRecord, AttendanceStatus, DayStatus, GeoLocation};
pub use employee::{Employee, NewEmployee};
pub use regularization::{
    RegularizationAction, RegularizationDraft, RegularizationRequest, RegularizationStatus,
    Resolution,
};
pub use summary::{AttendanceSummary, AttendanceTotals, DayAttendance, DayMark};
