//! Page controllers.
//!
//! Each module follows the same layout: `service.rs` holds the REST calls
//! for one area of the API, `controller.rs` the state a page keeps while it
//! is on screen (subscriptions, filters, forms and writes).

pub mod attendance;
pub mod auth;
pub mod calendar;
pub mod courses;
pub mod crud;
pub mod gps;
pub mod grades;
pub mod justifications;
pub mod messages;
pub mod parents;
pub mod reports;
pub mod settings;
pub mod students;
pub mod teachers;
