//! HTTP access to the school API.
//!
//! - [`HttpClient`]: the single place requests are made
//! - [`params`]: query-string encoding of JSON params

pub mod http;
pub mod params;

pub use http::HttpClient;
