//! Client error taxonomy.
//!
//! Every transport or protocol failure is normalized into [`ClientError`]
//! before it reaches a page controller. Pages never branch on status codes;
//! they read [`ClientError::message`] and show it inline (reads) or in a
//! toast (writes).

use std::collections::BTreeMap;
use std::fmt;

use validator::ValidationErrors;

/// Message shown when the server gave no usable explanation or could not be reached.
pub const GENERIC_ERROR_MESSAGE: &str = "Connection error. Please try again.";

/// Message attached to the 401 path before the login route takes over.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// No response was received (connection refused, DNS, timeout).
    #[error("{message}")]
    Network { message: String },

    /// Non-2xx response other than 401.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 401 response. The session has already been cleared when this is returned.
    #[error("{message}")]
    Unauthorized { message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("{message}")]
    Decode { message: String },

    /// Form input rejected before any request was made.
    #[error("{0}")]
    Validation(FieldErrors),
}

impl ClientError {
    pub fn network() -> Self {
        Self::Network {
            message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Builds an HTTP error, falling back to the generic message when the
    /// server body carried none.
    pub fn http(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        Self::Http { status, message }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            message: SESSION_EXPIRED_MESSAGE.to_string(),
        }
    }

    pub fn decode<E: fmt::Display>(err: E) -> Self {
        Self::Decode {
            message: format!("Unexpected response from server: {err}"),
        }
    }

    /// Human-readable message for display.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(FieldErrors::from(errors))
    }
}

/// Inline form errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{field} is required"));
            fields.insert(field.to_string(), message);
        }
        fields
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.values().cloned().collect();
        write!(f, "{}", parts.join("; "))
    }
}
