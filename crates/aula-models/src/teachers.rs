//! Teacher records, forms, and statistics.

use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::{deserialize_lenient_i64, deserialize_optional_string};

use crate::ids::{CourseId, TeacherId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(alias = "_id", default)]
    pub id: TeacherId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub dni: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub specialty: Option<String>,
    #[serde(default)]
    pub courses: Vec<CourseId>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeacherForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "DNI is required"))]
    pub dni: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl From<&Teacher> for TeacherForm {
    fn from(t: &Teacher) -> Self {
        Self {
            first_name: t.first_name.clone(),
            last_name: t.last_name.clone(),
            dni: t.dni.clone(),
            email: t.email.clone(),
            phone: t.phone.clone(),
            specialty: t.specialty.clone(),
        }
    }
}

/// `GET /teachers/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStats {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub total: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub active: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub with_courses: i64,
}
