//! Course records and forms.

use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::{deserialize_lenient_i64, deserialize_optional_string};

use crate::ids::{CourseId, StudentId, TeacherId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "_id", default)]
    pub id: CourseId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub division: Option<String>,
    #[serde(default)]
    pub teacher: Option<TeacherId>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub student_count: i64,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<TeacherId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

impl From<&Course> for CourseForm {
    fn from(c: &Course) -> Self {
        Self {
            name: c.name.clone(),
            level: c.level.clone(),
            division: c.division.clone(),
            teacher: c.teacher.clone(),
            schedule: c.schedule.clone(),
        }
    }
}

/// Body of `POST /courses/{id}/students`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollStudentsRequest {
    #[validate(length(min = 1, message = "Select at least one student"))]
    pub student_ids: Vec<StudentId>,
}
