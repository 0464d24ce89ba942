//! Grade records, forms, and averages.

use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::{deserialize_lenient_f64, deserialize_lenient_i64, deserialize_optional_string};

use crate::ids::{CourseId, GradeId, StudentId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    #[serde(alias = "_id", default)]
    pub id: GradeId,
    #[serde(default)]
    pub student: StudentId,
    #[serde(default)]
    pub course: CourseId,
    #[serde(default)]
    pub subject: String,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub score: f64,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GradeForm {
    #[validate(length(min = 1, message = "Student is required"))]
    pub student: String,
    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl From<&Grade> for GradeForm {
    fn from(g: &Grade) -> Self {
        Self {
            student: g.student.to_string(),
            course: g.course.to_string(),
            subject: g.subject.clone(),
            score: g.score,
            period: g.period.clone(),
            comment: g.comment.clone(),
        }
    }
}

/// One row of `GET /grades/averages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAverage {
    #[serde(default)]
    pub course: CourseId,
    #[serde(default)]
    pub subject: String,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub average: f64,
}

/// `GET /grades/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeStats {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub total: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub average: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub passed: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub failed: i64,
}

impl GradeStats {
    pub fn pass_rate(&self) -> f64 {
        aula_core::stats::percentage(self.passed as f64, (self.passed + self.failed) as f64)
    }
}
