//! Calendar events.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::deserialize_optional_string;

use crate::ids::{CourseId, EventId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "_id", default)]
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub location: Option<String>,
    /// Public events are listed without authentication
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub course: Option<CourseId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Start is required"))]
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseId>,
}

impl From<&Event> for EventForm {
    fn from(e: &Event) -> Self {
        Self {
            title: e.title.clone(),
            start: e.start.to_rfc3339(),
            end: e.end.map(|d| d.to_rfc3339()),
            description: e.description.clone(),
            location: e.location.clone(),
            is_public: e.is_public,
            course: e.course.clone(),
        }
    }
}

/// Inclusive month window used by the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl MonthRange {
    /// Range covering the month `month` (1-12) of `year`; `None` for invalid months.
    pub fn of(year: i32, month: u32) -> Option<Self> {
        let from = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            from,
            to: next.pred_opt()?,
        })
    }
}
