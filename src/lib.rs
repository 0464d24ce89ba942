//! # Aula Admin
//!
//! Client core for the school administration dashboard: everything a
//! front end needs to talk to the school API, minus the rendering.
//!
//! ## Overview
//!
//! - **HTTP client**: bearer token injection, envelope decoding, and one
//!   error type for every failure
//! - **Session**: persisted sign-in state; any 401 signs the user out and
//!   routes to the login screen
//! - **Query cache**: keyed, de-duplicated reads with staleness, polling,
//!   prefix invalidation and garbage collection
//! - **Mutations**: writes that invalidate the right keys and report back
//!   through toasts
//! - **Pages**: controllers for students, teachers, parents, courses,
//!   grades, attendance, justifications, calendar, messages, GPS tracking,
//!   reports and settings
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── aula-core/          # Envelope, ClientError, stat helpers
//! ├── aula-config/        # Environment-driven configuration
//! ├── aula-auth/          # Session store and persistence
//! ├── aula-models/        # Records and forms
//! ├── aula-cache/         # Query cache, handles, mutations, keys
//! └── aula-observability/ # Logging and metrics
//! src/
//! ├── client/             # HttpClient
//! ├── navigation.rs       # Routes and the Navigator seam
//! ├── notifications/      # Toasts
//! ├── state.rs            # AppState wiring
//! └── modules/            # One module per page
//! ```
//!
//! Each page module follows the same structure:
//!
//! - `mod.rs`: Module exports
//! - `service.rs`: REST calls
//! - `controller.rs`: Page state (subscriptions, filters, forms, writes)
//!
//! ## Quick Start
//!
//! ```bash
//! AULA_API_URL=http://localhost:5000/api
//! AULA_API_TIMEOUT_SECS=30
//! AULA_SESSION_FILE=.aula/session.json
//! ```
//!
//! ```bash
//! cargo run -- login
//! cargo run -- students --page 2
//! ```
//!
//! ## Modules
//!
//! - [`client`]: HTTP access to the API
//! - [`error`]: Application errors
//! - [`modules`]: Page controllers
//! - [`navigation`]: Routes and navigation
//! - [`notifications`]: Toasts
//! - [`state`]: Shared application state

pub mod client;
pub mod error;
pub mod modules;
pub mod navigation;
pub mod notifications;
pub mod state;

// Re-export workspace crates for convenience
pub use aula_auth;
pub use aula_cache;
pub use aula_config;
pub use aula_core;
pub use aula_models;
pub use aula_observability;
