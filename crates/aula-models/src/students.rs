//! Student records, forms, and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::{deserialize_lenient_i64, deserialize_optional_string};

use crate::ids::{CourseId, ParentId, StudentId};

/// A student as listed by `GET /students`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(alias = "_id", default)]
    pub id: StudentId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// National identity document number
    #[serde(default)]
    pub dni: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub course: Option<CourseId>,
    #[serde(default)]
    pub parent: Option<ParentId>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Create / edit form for a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "DNI is required"))]
    pub dni: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentId>,
}

impl From<&Student> for StudentForm {
    fn from(s: &Student) -> Self {
        Self {
            first_name: s.first_name.clone(),
            last_name: s.last_name.clone(),
            dni: s.dni.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
            birth_date: s.birth_date.clone(),
            grade_level: s.grade_level.clone(),
            course: s.course.clone(),
            parent: s.parent.clone(),
        }
    }
}

/// `GET /students/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub total: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub active: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub inactive: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub new_this_month: i64,
}

impl StudentStats {
    pub fn active_rate(&self) -> f64 {
        aula_core::stats::percentage(self.active as f64, self.total as f64)
    }
}
