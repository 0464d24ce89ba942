//! # Aula Auth
//!
//! Session state, persistence, and token inspection for the Aula admin client.
//!
//! This crate provides:
//!
//! - [`session`]: The [`Session`] record and the signed-in [`User`]
//! - [`store`]: [`SessionStore`], the single writable copy of the session
//! - [`persistence`]: Durable storage for the session between runs
//! - [`claims`]: Read-only inspection of the bearer token payload
//!
//! # State Machine
//!
//! ```text
//! anonymous --login--> authenticated --logout / 401--> anonymous
//! ```
//!
//! The loading flag is orthogonal to authentication and never persisted.
//!
//! # Example
//!
//! ```ignore
//! use aula_auth::{SessionStore, User};
//!
//! let store = SessionStore::in_memory();
//! store.login(user, "token");
//! assert!(store.is_authenticated());
//! store.logout();
//! ```

pub mod claims;
pub mod persistence;
pub mod session;
pub mod store;

// Re-export commonly used types at crate root
pub use claims::{ClaimsError, TokenClaims, peek_claims};
pub use persistence::{
    FileSessionPersistence, MemorySessionPersistence, PersistError, SessionPersistence,
};
pub use session::{Session, User};
pub use store::SessionStore;
