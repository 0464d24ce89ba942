//! Parent / guardian records and forms.

use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::deserialize_optional_string;

use crate::ids::{ParentId, StudentId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    #[serde(alias = "_id", default)]
    pub id: ParentId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub dni: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub relationship: Option<String>,
    #[serde(default)]
    pub students: Vec<StudentId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParentForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "DNI is required"))]
    pub dni: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl From<&Parent> for ParentForm {
    fn from(p: &Parent) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            dni: p.dni.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
            relationship: p.relationship.clone(),
        }
    }
}

/// Body of `POST /parents/{id}/students`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStudentRequest {
    pub student_id: StudentId,
}
