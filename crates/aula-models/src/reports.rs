//! Generated reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::deserialize_optional_string;

use crate::ids::ReportId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Attendance,
    Grades,
    Students,
    Justifications,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(alias = "_id", default)]
    pub id: ReportId,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: ReportKind,
    /// Absolute URL or bare file name of the generated file
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub file: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /reports`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}
