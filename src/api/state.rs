//! Application state for the attendance API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::auth::InMemoryAuthProvider;
use crate::clock::Clock;
use crate::config::ConfigLoader;
use crate::error::AttendanceResult;
use crate::service::AttendanceService;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// Contains the attendance service every handler delegates to.
#[derive(Clone)]
pub struct AppState {
    service: Arc<AttendanceService>,
}

impl AppState {
    /// Creates a new application state around a service.
    pub fn new(service: AttendanceService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds a state backed by the in-memory store and auth provider,
    /// seeded with the configured roster.
    pub async fn in_memory(config: &ConfigLoader, clock: Arc<dyn Clock>) -> AttendanceResult<Self> {
        let service = AttendanceService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryAuthProvider::new()),
            clock,
            config.policy().clone(),
        );
        service.seed(config.roster()).await?;
        Ok(Self::new(service))
    }

    /// Returns a reference to the attendance service.
    pub fn service(&self) -> &AttendanceService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_in_memory_state_seeds_roster() {
        use crate::clock::FixedClock;
        use crate::config::{AttendanceConfig, AttendancePolicy, SeedEmployee};
        use chrono::DateTime;

        let config = ConfigLoader::from_config(AttendanceConfig::new(
            AttendancePolicy::default(),
            vec![SeedEmployee {
                employee_code: "00000".to_string(),
                name: "Admin User".to_string(),
                email: "admin@example.com".to_string(),
                password: "admin001".to_string(),
                is_admin: true,
            }],
        ));
        let clock = Arc::new(FixedClock::new(
            DateTime::parse_from_rfc3339("2024-01-01T09:00:00+05:30").unwrap(),
        ));

        let state = AppState::in_memory(&config, clock).await.unwrap();
        let outcome = state.service().login("00000", "admin001").await.unwrap();
        assert!(outcome.employee.is_admin);
    }
}
