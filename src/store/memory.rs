use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{AttendanceHistory, AttendanceRecord, Employee, RegularizationRequest};

use super::{Store, StoreError, attendance_key};

#[derive(Debug, Default)]
struct State {
    employees: BTreeMap<String, Employee>,
    requests: Vec<RegularizationRequest>,
}

impl State {
    fn employee_mut(&mut self, code: &str) -> Result<&mut Employee, StoreError> {
        self.employees
            .get_mut(code)
            .ok_or_else(|| StoreError::NotFound {
                key: code.to_string(),
            })
    }
}

/// A [`Store`] held in process memory.
///
/// All state sits behind one lock, so multi-entity writes such as resolving
/// a regularization are atomic with respect to every other call.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn get_employee_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.state.read().await.employees.get(code).cloned())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.state.read().await.employees.values().cloned().collect())
    }

    async fn add_employee(&self, employee: Employee) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.employees.contains_key(&employee.employee_code) {
            return Err(StoreError::Conflict {
                key: employee.employee_code,
            });
        }
        state
            .employees
            .insert(employee.employee_code.clone(), employee);
        Ok(())
    }

    async fn attendance_for(&self, code: &str) -> Result<AttendanceHistory, StoreError> {
        self.state
            .read()
            .await
            .employees
            .get(code)
            .map(|e| e.attendance.clone())
            .ok_or_else(|| StoreError::NotFound {
                key: code.to_string(),
            })
    }

    async fn create_attendance_record(&self, record: AttendanceRecord) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let employee = state.employee_mut(&record.employee_code)?;
        if employee.attendance.contains_key(&record.date) {
            return Err(StoreError::Conflict {
                key: attendance_key(&record.employee_code, record.date),
            });
        }
        employee.attendance.insert(record.date, record);
        Ok(())
    }

    async fn write_attendance_record(&self, record: AttendanceRecord) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let employee = state.employee_mut(&record.employee_code)?;
        employee.attendance.insert(record.date, record);
        Ok(())
    }

    async fn record_punch_out(
        &self,
        code: &str,
        date: NaiveDate,
        logout_time: &str,
    ) -> Result<AttendanceRecord, StoreError> {
        let mut state = self.state.write().await;
        let employee = state.employee_mut(code)?;
        let record = employee
            .attendance
            .get_mut(&date)
            .ok_or_else(|| StoreError::NotFound {
                key: attendance_key(code, date),
            })?;
        if record.has_punched_out() {
            return Err(StoreError::Conflict {
                key: attendance_key(code, date),
            });
        }
        record.logout_time = Some(logout_time.to_string());
        Ok(record.clone())
    }

    async fn create_regularization_request(
        &self,
        request: RegularizationRequest,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.requests.iter().any(|r| r.id == request.id) {
            return Err(StoreError::Conflict {
                key: request.id.to_string(),
            });
        }
        state.requests.push(request);
        Ok(())
    }

    async fn list_pending_regularization_requests(
        &self,
    ) -> Result<Vec<RegularizationRequest>, StoreError> {
        let state = self.state.read().await;
        let mut pending: Vec<_> = state
            .requests
            .iter()
            .filter(|r| !r.status.is_terminal())
            .cloned()
            .collect();
        pending.sort_by_key(|r| r.submitted_at);
        Ok(pending)
    }

    async fn get_regularization_request(
        &self,
        id: Uuid,
    ) -> Result<Option<RegularizationRequest>, StoreError> {
        let state = self.state.read().await;
        Ok(state.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn resolve_and_delete_request(
        &self,
        id: Uuid,
        approved: Option<AttendanceRecord>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let position = state
            .requests
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound { key: id.to_string() })?;

        if let Some(record) = approved {
            let employee = state.employee_mut(&record.employee_code)?;
            employee.attendance.insert(record.date, record);
        }
        state.requests.remove(position);
        Ok(())
    }
}
