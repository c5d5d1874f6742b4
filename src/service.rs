//! Attendance service.
//!
//! [`AttendanceService`] is the orchestration layer between the HTTP API and
//! the collaborators. Each operation reads the clock once, loads what it
//! needs from the [`Store`], asks the [`AttendanceEvaluator`] for a decision
//! and persists the result in a single store call.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::{AuthError, AuthProvider, Identity};
use crate::clock::Clock;
use crate::config::{AttendancePolicy, SeedEmployee};
use crate::error::{AttendanceError, AttendanceResult};
use crate::evaluation::{AttendanceEvaluator, punch_time};
use crate::models::{
    AttendanceRecord, AttendanceSummary, DayStatus, Employee, GeoLocation, NewEmployee,
    RegularizationAction, RegularizationDraft, RegularizationRequest, Resolution,
};
use crate::store::{Store, StoreError};

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Token to present on later calls.
    pub session_token: String,
    /// The logged-in employee, without attendance.
    pub employee: EmployeeProfile,
    /// True when the employee has no record yet today.
    pub first_login_of_day: bool,
    /// Today's status at login.
    pub today_status: DayStatus,
}

/// An employee without their attendance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Login code.
    pub employee_code: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Whether the employee is an administrator.
    pub is_admin: bool,
}

impl From<&Employee> for EmployeeProfile {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_code: employee.employee_code.clone(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            is_admin: employee.is_admin,
        }
    }
}

/// What the dashboard shows for today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayView {
    /// Today's local date.
    pub date: NaiveDate,
    /// Today's status.
    pub status: DayStatus,
    /// Today's record, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AttendanceRecord>,
    /// Whether a punch-in would be accepted now.
    pub can_punch_in: bool,
    /// Whether a punch-out would be accepted now.
    pub can_punch_out: bool,
}

/// One row of the admin employee list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeOverview {
    /// The employee.
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    /// Their status today.
    pub today_status: DayStatus,
}

/// Capture details sent with a punch-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchIn {
    /// Reference to the uploaded photo.
    pub photo: String,
    /// Where the employee was.
    pub location: GeoLocation,
}

/// Orchestrates attendance operations over injected collaborators.
#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn Store>,
    auth: Arc<dyn AuthProvider>,
    clock: Arc<dyn Clock>,
    evaluator: AttendanceEvaluator,
}

impl AttendanceService {
    /// Creates a service.
    pub fn new(
        store: Arc<dyn Store>,
        auth: Arc<dyn AuthProvider>,
        clock: Arc<dyn Clock>,
        policy: AttendancePolicy,
    ) -> Self {
        Self {
            store,
            auth,
            clock,
            evaluator: AttendanceEvaluator::new(policy),
        }
    }

    /// The evaluator this service decides with.
    pub fn evaluator(&self) -> &AttendanceEvaluator {
        &self.evaluator
    }

    /// Creates roster employees that do not exist yet.
    ///
    /// Returns how many were created. Existing employees are left untouched.
    pub async fn seed(&self, roster: &[SeedEmployee]) -> AttendanceResult<usize> {
        let mut created = 0;
        for seed in roster {
            if self.store.get_employee_by_code(&seed.employee_code).await?.is_some() {
                debug!(employee_code = %seed.employee_code, "Seed employee already present");
                continue;
            }
            self.create_employee(NewEmployee {
                employee_code: seed.employee_code.clone(),
                name: seed.name.clone(),
                email: seed.email.clone(),
                password: seed.password.clone(),
                is_admin: seed.is_admin,
            })
            .await?;
            created += 1;
        }
        info!(created, roster = roster.len(), "Roster seeded");
        Ok(created)
    }

    /// Logs an employee in by code and password.
    pub async fn login(&self, code: &str, password: &str) -> AttendanceResult<LoginOutcome> {
        let employee = self.employee(code).await?;
        let identity = self
            .auth
            .verify_credentials(code, password)
            .await
            .inspect_err(|_| warn!(employee_code = %code, "Login rejected"))?;

        let now = self.clock.now();
        let outcome = LoginOutcome {
            session_token: identity.session_token,
            employee: EmployeeProfile::from(&employee),
            first_login_of_day: self
                .evaluator
                .is_first_login_of_day(&employee.attendance, now),
            today_status: self.evaluator.derive_today_status(&employee.attendance, now),
        };
        info!(
            employee_code = %code,
            first_login_of_day = outcome.first_login_of_day,
            "Employee logged in"
        );
        Ok(outcome)
    }

    /// Ends a session.
    pub async fn logout(&self, session_token: &str) -> AttendanceResult<()> {
        self.auth.end_session(session_token).await?;
        Ok(())
    }

    /// Resolves a session token.
    pub async fn authenticate(&self, session_token: &str) -> AttendanceResult<Identity> {
        Ok(self.auth.authenticate(session_token).await?)
    }

    /// Today's status and what the caller may do next.
    pub async fn today(&self, identity: &Identity) -> AttendanceResult<TodayView> {
        let employee = self.employee(&identity.employee_code).await?;
        let now = self.clock.now();
        let records = &employee.attendance;
        let already = self.evaluator.has_punched_in_today(records, now);

        Ok(TodayView {
            date: now.naive_local().date(),
            status: self.evaluator.derive_today_status(records, now),
            record: records.get(&now.naive_local().date()).cloned(),
            can_punch_in: self.evaluator.can_punch_in(records, now, already),
            can_punch_out: self
                .evaluator
                .check_punch_out(&employee.employee_code, records, now)
                .is_ok(),
        })
    }

    /// Records the caller's punch-in for today.
    ///
    /// Two racing punch-ins both pass the evaluator check; the store's
    /// create-only insert lets exactly one through.
    pub async fn punch_in(
        &self,
        identity: &Identity,
        punch: PunchIn,
        client_ip: &str,
    ) -> AttendanceResult<AttendanceRecord> {
        let code = identity.employee_code.as_str();
        let employee = self.employee(code).await?;
        let now = self.clock.now();

        self.evaluator
            .check_punch_in(code, &employee.attendance, now)
            .inspect_err(|e| warn!(employee_code = %code, error = %e, "Punch-in refused"))?;

        let record = self
            .evaluator
            .build_attendance_record(code, &punch.photo, punch.location, now, client_ip);

        match self.store.create_attendance_record(record.clone()).await {
            Ok(()) => {}
            Err(StoreError::Conflict { .. }) => {
                warn!(employee_code = %code, date = %record.date, "Punch-in lost a race");
                return Err(AttendanceError::AlreadyPunchedIn {
                    code: code.to_string(),
                    date: record.date,
                });
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            employee_code = %code,
            date = %record.date,
            time = %record.time,
            status = %record.status,
            "Punched in"
        );
        Ok(record)
    }

    /// Records the caller's punch-out for today.
    pub async fn punch_out(&self, identity: &Identity) -> AttendanceResult<AttendanceRecord> {
        let code = identity.employee_code.as_str();
        let employee = self.employee(code).await?;
        let now = self.clock.now();
        let local = now.naive_local();

        self.evaluator
            .check_punch_out(code, &employee.attendance, now)
            .inspect_err(|e| warn!(employee_code = %code, error = %e, "Punch-out refused"))?;

        let record = self
            .store
            .record_punch_out(code, local.date(), &punch_time(local))
            .await
            .map_err(|e| match e {
                StoreError::Conflict { .. } => AttendanceError::AlreadyPunchedOut {
                    code: code.to_string(),
                    date: local.date(),
                },
                StoreError::NotFound { .. } => AttendanceError::NotPunchedIn {
                    code: code.to_string(),
                    date: local.date(),
                },
                other => other.into(),
            })?;

        info!(
            employee_code = %code,
            date = %record.date,
            logout_time = record.logout_time.as_deref().unwrap_or_default(),
            "Punched out"
        );
        Ok(record)
    }

    /// Submits a regularization request for the caller.
    pub async fn submit_regularization(
        &self,
        identity: &Identity,
        draft: RegularizationDraft,
    ) -> AttendanceResult<RegularizationRequest> {
        let code = identity.employee_code.as_str();
        let employee = self.employee(code).await?;
        let pending = self.store.list_pending_regularization_requests().await?;
        let now = self.clock.now();

        self.evaluator
            .validate_regularization(code, &draft, &employee.attendance, &pending, now)
            .inspect_err(|e| warn!(employee_code = %code, error = %e, "Regularization refused"))?;

        let request = RegularizationRequest::pending(code, draft, now);
        self.store
            .create_regularization_request(request.clone())
            .await?;

        info!(
            employee_code = %code,
            request_id = %request.id,
            date = %request.date,
            "Regularization submitted"
        );
        Ok(request)
    }

    /// Pending requests, oldest first. Admin only.
    pub async fn pending_regularizations(
        &self,
        identity: &Identity,
    ) -> AttendanceResult<Vec<RegularizationRequest>> {
        self.require_admin(identity, "list regularization requests")
            .await?;
        Ok(self.store.list_pending_regularization_requests().await?)
    }

    /// Approves or rejects a request. Admin only.
    ///
    /// The approved record (if any) is written and the request deleted in
    /// one store call.
    pub async fn resolve_regularization(
        &self,
        identity: &Identity,
        id: Uuid,
        action: RegularizationAction,
    ) -> AttendanceResult<Resolution> {
        self.require_admin(identity, "resolve regularization requests")
            .await?;

        let not_found = || AttendanceError::RegularizationNotFound { id: id.to_string() };
        let request = self
            .store
            .get_regularization_request(id)
            .await?
            .ok_or_else(not_found)?;

        let resolution = self
            .evaluator
            .resolve_regularization(&request, action, self.clock.now());

        self.store
            .resolve_and_delete_request(id, resolution.record().cloned())
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => not_found(),
                other => other.into(),
            })?;

        info!(
            admin = %identity.employee_code,
            request_id = %id,
            employee_code = %request.employee_code,
            date = %request.date,
            outcome = ?resolution.status(),
            "Regularization resolved"
        );
        Ok(resolution)
    }

    /// Every employee with today's status. Admin only.
    pub async fn list_employees(
        &self,
        identity: &Identity,
    ) -> AttendanceResult<Vec<EmployeeOverview>> {
        self.require_admin(identity, "list employees").await?;
        let now = self.clock.now();
        Ok(self
            .store
            .list_employees()
            .await?
            .iter()
            .map(|employee| EmployeeOverview {
                profile: EmployeeProfile::from(employee),
                today_status: self.evaluator.derive_today_status(&employee.attendance, now),
            })
            .collect())
    }

    /// Creates an employee and registers their password. Admin only.
    pub async fn add_employee(
        &self,
        identity: &Identity,
        new_employee: NewEmployee,
    ) -> AttendanceResult<EmployeeProfile> {
        self.require_admin(identity, "add employees").await?;
        let employee = self.create_employee(new_employee).await?;
        info!(
            admin = %identity.employee_code,
            employee_code = %employee.employee_code,
            "Employee added"
        );
        Ok(employee)
    }

    /// Attendance summary for `code` (the caller when `None`).
    ///
    /// Only administrators may read another employee's summary.
    pub async fn summary(
        &self,
        identity: &Identity,
        code: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AttendanceResult<AttendanceSummary> {
        let code = code.unwrap_or(identity.employee_code.as_str());
        if code != identity.employee_code {
            self.require_admin(identity, "read other employees' attendance")
                .await?;
        }
        let employee = self.employee(code).await?;
        self.evaluator
            .summarize(code, &employee.attendance, from, to, self.clock.now())
    }

    async fn employee(&self, code: &str) -> AttendanceResult<Employee> {
        self.store
            .get_employee_by_code(code)
            .await?
            .ok_or_else(|| AttendanceError::EmployeeNotFound {
                code: code.to_string(),
            })
    }

    async fn require_admin(&self, identity: &Identity, action: &str) -> AttendanceResult<Employee> {
        let employee = self.employee(&identity.employee_code).await?;
        if !employee.is_admin {
            warn!(employee_code = %identity.employee_code, action, "Forbidden");
            return Err(AttendanceError::Forbidden {
                code: identity.employee_code.clone(),
                action: action.to_string(),
            });
        }
        Ok(employee)
    }

    async fn create_employee(&self, new_employee: NewEmployee) -> AttendanceResult<EmployeeProfile> {
        let code = new_employee.employee_code.trim().to_string();
        if code.is_empty() {
            return Err(AttendanceError::InvalidEmployee {
                field: "employee_code".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if new_employee.password.is_empty() {
            return Err(AttendanceError::InvalidEmployee {
                field: "password".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let employee = Employee::new(
            code.as_str(),
            new_employee.name,
            new_employee.email,
            new_employee.is_admin,
            self.clock.now().with_timezone(&Utc),
        );
        let profile = EmployeeProfile::from(&employee);

        self.store.add_employee(employee).await.map_err(|e| match e {
            StoreError::Conflict { .. } => AttendanceError::EmployeeExists { code: code.clone() },
            other => other.into(),
        })?;
        self.auth
            .register_credentials(&code, &new_employee.password)
            .await
            .map_err(|e| match e {
                AuthError::AlreadyRegistered(code) => AttendanceError::EmployeeExists { code },
                other => other.into(),
            })?;

        Ok(profile)
    }
}
