//! Leave Record Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Leave category, fixed set decided by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    Maternity,
    Paternity,
    Bereavement,
    Other,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Maternity => "maternity",
            LeaveType::Paternity => "paternity",
            LeaveType::Bereavement => "bereavement",
            LeaveType::Other => "other",
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown leave type string received from a form or the backend
#[derive(Debug, thiserror::Error)]
#[error("unknown leave type: {0}")]
pub struct UnknownLeaveType(pub String);

impl std::str::FromStr for LeaveType {
    type Err = UnknownLeaveType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annual" => Ok(LeaveType::Annual),
            "sick" => Ok(LeaveType::Sick),
            "personal" => Ok(LeaveType::Personal),
            "maternity" => Ok(LeaveType::Maternity),
            "paternity" => Ok(LeaveType::Paternity),
            "bereavement" => Ok(LeaveType::Bereavement),
            "other" => Ok(LeaveType::Other),
            other => Err(UnknownLeaveType(other.to_string())),
        }
    }
}

/// Approval state. Transitions are one-way: pending -> approved or
/// pending -> rejected, decided by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leave record as returned by the backend
///
/// Dates are ISO `YYYY-MM-DD` strings on the wire; `days` is the inclusive
/// calendar-day count between `start_date` and `end_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub leave_id: String,
    pub staff_id: String,
    pub staff_name: String,
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    pub days: i64,
    pub reason: String,
    #[serde(default)]
    pub comments: Option<String>,
    pub status: LeaveStatus,
    #[serde(default)]
    pub applied_date: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_date: Option<String>,
}

/// Create leave payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveCreate {
    pub leave_id: String,
    pub staff_id: String,
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

/// Update leave payload (editable fields only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveUpdate {
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

/// Approve/reject payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub approved_by: String,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Inclusive calendar-day count between two ISO dates.
///
/// Returns `None` when either date fails to parse or the range is inverted;
/// form validation rejects both cases before a record reaches this point.
pub fn days_inclusive(start_date: &str, end_date: &str) -> Option<i64> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(end_date, "%Y-%m-%d").ok()?;
    let days = (end - start).num_days() + 1;
    (days >= 1).then_some(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_single_day() {
        assert_eq!(days_inclusive("2024-06-10", "2024-06-10"), Some(1));
    }

    #[test]
    fn test_days_inclusive_range() {
        assert_eq!(days_inclusive("2024-01-01", "2024-01-05"), Some(5));
    }

    #[test]
    fn test_days_spans_month_boundary() {
        assert_eq!(days_inclusive("2024-01-30", "2024-02-02"), Some(4));
    }

    #[test]
    fn test_days_rejects_inverted_range() {
        assert_eq!(days_inclusive("2024-03-10", "2024-03-05"), None);
    }

    #[test]
    fn test_days_rejects_malformed_date() {
        assert_eq!(days_inclusive("2024-13-40", "2024-01-05"), None);
        assert_eq!(days_inclusive("yesterday", "2024-01-05"), None);
    }

    #[test]
    fn test_leave_record_wire_format() {
        let json = r#"{
            "leave_id": "42",
            "staff_id": "7",
            "staff_name": "Alice Wong",
            "leave_type": "annual",
            "start_date": "2024-01-01",
            "end_date": "2024-01-05",
            "days": 5,
            "reason": "Family trip",
            "status": "pending"
        }"#;
        let record: LeaveRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.leave_type, LeaveType::Annual);
        assert_eq!(record.status, LeaveStatus::Pending);
        assert_eq!(record.days, 5);
        assert!(record.approved_by.is_none());
    }
}
