//! # Aula Cache
//!
//! Client-side data synchronisation for the Aula admin client.
//!
//! This crate provides:
//! - Canonical query keys with prefix matching
//! - A shared query cache with request de-duplication, stale-while-error
//!   and newest-request-wins ordering
//! - Query handles (subscriptions) with dependent queries and polling
//! - A mutation executor that invalidates keys and runs success effects
//! - Cancellable scheduled tasks and a debouncer
//! - The domain key catalogue and invalidation sets
//!
//! # Example
//!
//! ```ignore
//! use aula_cache::{QueryCache, QueryFn, QueryOptions, keys};
//!
//! let cache = QueryCache::new(QueryConfig::from_env());
//! let handle: QueryHandle<Paginated<Student>> = cache.subscribe(
//!     keys::students::list(json!({ "page": 1 })),
//!     QueryFn::new(move |key| fetch_students(key)),
//!     QueryOptions::default(),
//! );
//!
//! let state = handle.settled().await;
//! ```

pub mod handle;
pub mod key;
pub mod keys;
pub mod mutation;
pub mod query;
pub mod schedule;

pub use handle::{QueryHandle, QueryOptions};
pub use key::QueryKey;
pub use keys::invalidate;
pub use mutation::{Mutation, MutationError, MutationStatus};
pub use query::{QueryCache, QueryFn, QueryResult, QueryState, QueryStatus};
pub use schedule::{Debouncer, ScheduledTask};
