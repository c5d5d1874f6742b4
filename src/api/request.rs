//! Request types for the attendance API.
//!
//! Bodies that map one-to-one onto domain types
//! ([`RegularizationDraft`](crate::models::RegularizationDraft),
//! [`NewEmployee`](crate::models::NewEmployee)) are accepted as those types
//! directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{GeoLocation, RegularizationAction};
use crate::service::PunchIn;

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The employee code, e.g. "39466".
    pub employee_code: String,
    /// The password.
    pub password: String,
}

/// Request body for `POST /attendance/punch-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchInRequest {
    /// Reference to the captured photo.
    #[serde(default)]
    pub photo: String,
    /// Where the employee punched in.
    pub location: GeoLocation,
}

impl From<PunchInRequest> for PunchIn {
    fn from(req: PunchInRequest) -> Self {
        PunchIn {
            photo: req.photo,
            location: req.location,
        }
    }
}

/// Request body for `POST /regularizations/:id/resolve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// `approve` or `reject`.
    pub action: RegularizationAction,
}

/// Query string for `GET /attendance/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
    /// Whose summary; defaults to the caller.
    #[serde(default)]
    pub employee_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punch_in_request_photo_defaults_empty() {
        let json = r#"{"location": {"latitude": 19.07, "longitude": 72.87, "address": "Mumbai"}}"#;
        let req: PunchInRequest = serde_json::from_str(json).unwrap();
        assert!(req.photo.is_empty());
        assert_eq!(req.location.address, "Mumbai");
    }

    #[test]
    fn test_resolve_request_actions() {
        let approve: ResolveRequest = serde_json::from_str(r#"{"action": "approve"}"#).unwrap();
        assert_eq!(approve.action, RegularizationAction::Approve);
        assert!(serde_json::from_str::<ResolveRequest>(r#"{"action": "maybe"}"#).is_err());
    }
}
