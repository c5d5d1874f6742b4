//! Persistence collaborator.
//!
//! The [`Store`] trait is the only way the service reaches persistent state.
//! Implementations must make [`Store::create_attendance_record`] create-only
//! and [`Store::resolve_and_delete_request`] atomic; everything else is plain
//! reads and writes.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AttendanceHistory, AttendanceRecord, Employee, RegularizationRequest};

/// Errors reported by a store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A create-only write found the key already taken.
    #[error("store conflict on key {key}")]
    Conflict {
        /// The contested key.
        key: String,
    },

    /// A write targeted an entity that does not exist.
    #[error("store entity not found: {key}")]
    NotFound {
        /// The missing key.
        key: String,
    },

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// The key for one employee's record on one day.
pub fn attendance_key(employee_code: &str, date: NaiveDate) -> String {
    format!("{}:{}", employee_code, date)
}

/// Persistent state for employees, attendance and regularization requests.
#[async_trait]
pub trait Store: Send + Sync {
    /// Looks up an employee, with attendance, by code.
    async fn get_employee_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError>;

    /// All employees, ordered by code.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Inserts a new employee. `Conflict` if the code is taken.
    async fn add_employee(&self, employee: Employee) -> Result<(), StoreError>;

    /// One employee's attendance history. `NotFound` for an unknown code.
    async fn attendance_for(&self, code: &str) -> Result<AttendanceHistory, StoreError>;

    /// Inserts a record only if none exists for its employee and date.
    async fn create_attendance_record(&self, record: AttendanceRecord) -> Result<(), StoreError>;

    /// Inserts or replaces the record for its employee and date.
    async fn write_attendance_record(&self, record: AttendanceRecord) -> Result<(), StoreError>;

    /// Sets the logout time on an existing record.
    async fn record_punch_out(
        &self,
        code: &str,
        date: NaiveDate,
        logout_time: &str,
    ) -> Result<AttendanceRecord, StoreError>;

    /// Stores a new request.
    async fn create_regularization_request(
        &self,
        request: RegularizationRequest,
    ) -> Result<(), StoreError>;

    /// All pending requests, oldest first.
    async fn list_pending_regularization_requests(
        &self,
    ) -> Result<Vec<RegularizationRequest>, StoreError>;

    /// Looks up a request by id.
    async fn get_regularization_request(
        &self,
        id: Uuid,
    ) -> Result<Option<RegularizationRequest>, StoreError>;

    /// Writes `approved` (if any) and deletes the request in one step.
    ///
    /// `NotFound` if the request is gone, in which case nothing is written.
    async fn resolve_and_delete_request(
        &self,
        id: Uuid,
        approved: Option<AttendanceRecord>,
    ) -> Result<(), StoreError>;
}
