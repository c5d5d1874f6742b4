//! Attendance record model and related types.
//!
//! An [`AttendanceRecord`] is one employee's outcome for one calendar date.
//! Records live in an [`AttendanceHistory`], keyed by date, so an employee can
//! never hold more than one record per day.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// The stored outcome of a day.
///
/// Serialized with the short codes used by existing attendance data:
/// `P`, `PL`, `A` and `R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Punched in on time.
    #[serde(rename = "P")]
    Present,
    /// Punched in after the late threshold.
    #[serde(rename = "PL")]
    PresentLate,
    /// Marked absent.
    #[serde(rename = "A")]
    Absent,
    /// Synthesized from an approved regularization request.
    #[serde(rename = "R")]
    Regularized,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "Present"),
            AttendanceStatus::PresentLate => write!(f, "Present (late)"),
            AttendanceStatus::Absent => write!(f, "Absent"),
            AttendanceStatus::Regularized => write!(f, "Regularized"),
        }
    }
}

/// Where a punch-in was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Human-readable address resolved by the client.
    pub address: String,
}

impl GeoLocation {
    /// A location with zeroed coordinates and the given address.
    ///
    /// Used for records that were not captured live.
    pub fn placeholder(address: impl Into<String>) -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            address: address.into(),
        }
    }
}

/// One employee's attendance for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_code: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Punch-in wall-clock time (`HH:MM:SS`, or the claimed login time for
    /// regularized records).
    pub time: String,
    /// Punch-out wall-clock time, once recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logout_time: Option<String>,
    /// The stored status.
    pub status: AttendanceStatus,
    /// Location captured at punch-in.
    pub location: GeoLocation,
    /// Opaque reference to the captured photo. Empty when none was captured.
    #[serde(default)]
    pub photo: String,
    /// Public IP address of the capturing device. Empty when unknown.
    #[serde(default)]
    pub ip_address: String,
    /// Full timestamp of the punch-in (or of the approval, for regularized
    /// records).
    pub timestamp: DateTime<FixedOffset>,
}

impl AttendanceRecord {
    /// Returns true once a punch-out time has been recorded.
    pub fn has_punched_out(&self) -> bool {
        self.logout_time.is_some()
    }
}

/// An employee's records keyed by calendar date.
pub type AttendanceHistory = BTreeMap<NaiveDate, AttendanceRecord>;

/// The derived status of a single day.
///
/// Unlike [`AttendanceStatus`], this distinguishes "no record yet today" from
/// "absent": only past days without a record are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Today, and no punch-in has happened yet.
    NotPunchedIn,
    /// Punched in on time.
    Present,
    /// Punched in after the late threshold.
    PresentLate,
    /// A past day with no record, or a record marked absent.
    Absent,
    /// Covered by an approved regularization.
    Regularized,
    /// A date after today.
    Upcoming,
}

impl DayStatus {
    /// Returns true for statuses that count as attended.
    pub fn is_attended(&self) -> bool {
        matches!(
            self,
            DayStatus::Present | DayStatus::PresentLate | DayStatus::Regularized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> AttendanceRecord {
        AttendanceRecord {
            employee_code: "39466".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            time: "09:15:00".to_string(),
            logout_time: None,
            status: AttendanceStatus::Present,
            location: GeoLocation {
                latitude: 19.07,
                longitude: 72.87,
                address: "Mumbai".to_string(),
            },
            photo: "photos/39466/2024-01-01.jpg".to_string(),
            ip_address: "203.0.113.7".to_string(),
            timestamp: DateTime::parse_from_rfc3339("2024-01-01T09:15:00+05:30").unwrap(),
        }
    }

    #[test]
    fn test_status_serializes_with_short_codes() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).unwrap(),
            "\"P\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::PresentLate).unwrap(),
            "\"PL\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Absent).unwrap(),
            "\"A\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Regularized).unwrap(),
            "\"R\""
        );
    }

    #[test]
    fn test_deserialize_record_without_optional_fields() {
        let json = r#"{
            "employee_code": "39466",
            "date": "2024-01-02",
            "time": "09:00",
            "status": "R",
            "location": { "latitude": 0.0, "longitude": 0.0, "address": "Regularized" },
            "timestamp": "2024-01-03T11:00:00+05:30"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, AttendanceStatus::Regularized);
        assert_eq!(record.logout_time, None);
        assert!(record.photo.is_empty());
        assert!(record.ip_address.is_empty());
    }

    #[test]
    fn test_logout_time_skipped_when_absent() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(!json.contains("logout_time"));
    }

    #[test]
    fn test_has_punched_out() {
        let mut record = sample_record();
        assert!(!record.has_punched_out());
        record.logout_time = Some("18:45:00".to_string());
        assert!(record.has_punched_out());
    }

    #[test]
    fn test_history_keys_serialize_as_iso_dates() {
        let record = sample_record();
        let mut history = AttendanceHistory::new();
        history.insert(record.date, record);

        let json = serde_json::to_value(&history).unwrap();
        assert!(json.get("2024-01-01").is_some());
    }

    #[test]
    fn test_placeholder_location_is_zeroed() {
        let location = GeoLocation::placeholder("Regularized");
        assert_eq!(location.latitude, 0.0);
        assert_eq!(location.longitude, 0.0);
        assert_eq!(location.address, "Regularized");
    }

    #[test]
    fn test_day_status_attended() {
        assert!(DayStatus::Present.is_attended());
        assert!(DayStatus::PresentLate.is_attended());
        assert!(DayStatus::Regularized.is_attended());
        assert!(!DayStatus::Absent.is_attended());
        assert!(!DayStatus::NotPunchedIn.is_attended());
        assert!(!DayStatus::Upcoming.is_attended());
    }
}
