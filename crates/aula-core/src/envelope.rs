//! Response envelope and pagination types.
//!
//! Every API response is wrapped in the same envelope:
//!
//! ```json
//! {
//!   "data": [...],
//!   "pagination": { "page": 1, "pages": 3, "total": 42 },
//!   "message": "optional"
//! }
//! ```
//!
//! The client always unwraps `data` before handing results to pages; list
//! endpoints additionally keep the pagination block as [`Paginated`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde::deserialize_lenient_i64;

/// Pagination metadata returned alongside list payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-indexed)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: i64,
    /// Total number of pages
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub pages: i64,
    /// Total number of items across all pages
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub total: i64,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// The envelope every endpoint responds with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    pub fn into_page(self) -> Paginated<T::Item>
    where
        T: IntoIterator,
    {
        Paginated {
            items: self.data.into_iter().collect(),
            pagination: self.pagination,
        }
    }
}

/// Shape of an error body; the server uses `message`, some routes `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

/// A page of records together with its pagination block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

impl<T> Paginated<T> {
    /// Total items across all pages, falling back to this page's length.
    pub fn total(&self) -> i64 {
        self.pagination
            .map(|p| p.total)
            .unwrap_or(self.items.len() as i64)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Page-based list parameters.
///
/// - `page` is clamped to a minimum of 1
/// - `limit` is clamped to the range [1, 100] and defaults to 10
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Writes the effective `page` and `limit` into a params object.
    pub fn write_into(&self, params: &mut Map<String, Value>) {
        params.insert("page".into(), Value::from(self.page()));
        params.insert("limit".into(), Value::from(self.limit()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_with_pagination() {
        let body = json!({
            "data": [1, 2, 3],
            "pagination": { "page": 1, "pages": 3, "total": 42 }
        });
        let envelope: ApiEnvelope<Vec<i32>> = serde_json::from_value(body).unwrap();
        let page = envelope.into_page();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total(), 42);
        assert!(page.pagination.unwrap().has_next());
    }

    #[test]
    fn test_envelope_without_pagination() {
        let body = json!({ "data": { "pending": 4 }, "message": "ok" });
        let envelope: ApiEnvelope<Value> = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.message.as_deref(), Some("ok"));
        assert!(envelope.pagination.is_none());
        assert_eq!(envelope.into_data()["pending"], 4);
    }

    #[test]
    fn test_pagination_accepts_string_numbers() {
        let p: Pagination =
            serde_json::from_value(json!({ "page": "2", "pages": "5", "total": "42" })).unwrap();
        assert_eq!(p, Pagination { page: 2, pages: 5, total: 42 });
        assert!(p.has_previous());
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_value(json!({ "message": "DNI duplicado", "error": "x" })).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("DNI duplicado"));

        let body: ErrorBody = serde_json::from_value(json!({ "error": "Bad input" })).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Bad input"));
    }

    #[test]
    fn test_page_params_clamping() {
        let params = PageParams {
            page: Some(-5),
            limit: Some(200),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 100);

        let defaults = PageParams::default();
        assert_eq!(defaults.page(), 1);
        assert_eq!(defaults.limit(), 10);
    }

    #[test]
    fn test_paginated_total_falls_back_to_len() {
        let page = Paginated {
            items: vec!["a", "b"],
            pagination: None,
        };
        assert_eq!(page.total(), 2);
    }
}
