//! Attendance records, bulk recording, and statistics.

use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::{deserialize_lenient_i64, deserialize_optional_string};

use crate::ids::{AttendanceId, CourseId, StudentId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Justified,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(alias = "_id", default)]
    pub id: AttendanceId,
    #[serde(default)]
    pub student: StudentId,
    #[serde(default)]
    pub course: CourseId,
    /// ISO date (the API may append a time component)
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub note: Option<String>,
}

/// Single record form (edit one student's attendance).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceForm {
    #[validate(length(min = 1, message = "Student is required"))]
    pub student: String,
    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&AttendanceRecord> for AttendanceForm {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            student: r.student.to_string(),
            course: r.course.to_string(),
            date: r.date.chars().take(10).collect(),
            status: r.status,
            note: r.note.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub student: StudentId,
    pub status: AttendanceStatus,
}

/// Body of `POST /attendance/bulk`: one course, one day, many students.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceRequest {
    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "Mark at least one student"))]
    pub entries: Vec<AttendanceEntry>,
}

/// `GET /attendance/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub present: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub absent: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub late: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub justified: i64,
}

impl AttendanceStats {
    pub fn total(&self) -> i64 {
        self.present + self.absent + self.late + self.justified
    }

    /// Present and late both count as attended.
    pub fn attendance_rate(&self) -> f64 {
        aula_core::stats::percentage((self.present + self.late) as f64, self.total() as f64)
    }

    pub fn attendance_rate_label(&self) -> String {
        aula_core::stats::format_percentage(self.attendance_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(AttendanceStatus::Late).unwrap(), json!("late"));
        let s: AttendanceStatus = serde_json::from_value(json!("justified")).unwrap();
        assert_eq!(s, AttendanceStatus::Justified);
    }

    #[test]
    fn test_rate_label() {
        let stats: AttendanceStats =
            serde_json::from_value(json!({ "present": 7, "late": "1", "absent": 2 })).unwrap();
        assert_eq!(stats.total(), 10);
        assert_eq!(stats.attendance_rate_label(), "80%");
    }

    #[test]
    fn test_bulk_request_needs_entries() {
        let req = BulkAttendanceRequest {
            course: "c-1".into(),
            date: "2024-05-02".into(),
            entries: vec![],
        };
        assert!(req.validate().is_err());
    }
}
