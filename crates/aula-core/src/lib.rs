//! # Aula Core
//!
//! Core types, errors, and utilities for the Aula admin client.
//!
//! This crate provides foundational types used throughout the client:
//!
//! - [`errors`]: The normalized client error taxonomy
//! - [`envelope`]: The API response envelope and pagination metadata
//! - [`stats`]: Safe number coercion and percentage helpers for dashboard statistics
//! - [`uploads`]: Download URL resolution for document references
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use aula_core::{ApiEnvelope, ClientError, PageParams};
//!
//! let params = PageParams { page: Some(2), limit: Some(15) };
//! assert_eq!(params.page(), 2);
//!
//! let err = ClientError::http(500, Some("DNI duplicado".into()));
//! assert_eq!(err.message(), "DNI duplicado");
//! ```

pub mod envelope;
pub mod errors;
pub mod serde;
pub mod stats;
pub mod uploads;

// Re-export commonly used types at crate root
pub use envelope::{ApiEnvelope, ErrorBody, PageParams, Paginated, Pagination};
pub use errors::{ClientError, FieldErrors, GENERIC_ERROR_MESSAGE, SESSION_EXPIRED_MESSAGE};
pub use uploads::{UPLOADS_PATH, resolve_document_url};
