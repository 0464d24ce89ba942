//! Internal messaging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use aula_core::serde::{deserialize_lenient_i64, deserialize_optional_id};

use crate::ids::MessageId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(alias = "_id", default)]
    pub id: MessageId,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub sender: Option<String>,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageForm {
    #[validate(length(min = 1, message = "Choose at least one recipient"))]
    pub recipients: Vec<String>,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub body: String,
}

/// `GET /messages/unread-count`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub count: i64,
}
