//! Absence justifications.
//!
//! Approving or rejecting a justification changes the matching attendance
//! records on the server, which is why its mutations also invalidate the
//! attendance queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::{deserialize_lenient_i64, deserialize_optional_string};

use crate::ids::{JustificationId, StudentId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JustificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl JustificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Justification {
    #[serde(alias = "_id", default)]
    pub id: JustificationId,
    #[serde(default)]
    pub student: StudentId,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub status: JustificationStatus,
    /// Absolute URL or bare file name of the supporting document
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub document: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub review_comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JustificationForm {
    #[validate(length(min = 1, message = "Student is required"))]
    pub student: String,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
    #[validate(length(min = 1, message = "Start date is required"))]
    pub start_date: String,
    #[validate(length(min = 1, message = "End date is required"))]
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl From<&Justification> for JustificationForm {
    fn from(j: &Justification) -> Self {
        Self {
            student: j.student.to_string(),
            reason: j.reason.clone(),
            start_date: j.start_date.clone(),
            end_date: j.end_date.clone(),
            document: j.document.clone(),
        }
    }
}

/// Body of `PATCH /justifications/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub status: JustificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_comment: Option<String>,
}

/// `GET /justifications/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JustificationStats {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub total: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub pending: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub approved: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub rejected: i64,
}

impl JustificationStats {
    pub fn approval_rate(&self) -> f64 {
        aula_core::stats::percentage(
            self.approved as f64,
            (self.approved + self.rejected) as f64,
        )
    }
}
