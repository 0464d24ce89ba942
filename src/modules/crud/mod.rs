//! Shared CRUD page machinery.
//!
//! Most pages are the same screen with different records: a filtered,
//! paginated list, optional stat cards, and a modal form for create and
//! edit. [`CrudPage`] implements that screen once for any [`Resource`].

pub mod filters;
pub mod modal;
pub mod page;
pub mod resource;
pub mod service;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use filters::ListFilters;
pub use modal::{ModalMode, ModalState};
pub use page::{CrudPage, SaveInput};
pub use resource::{Resource, StatCard};
pub use service::CrudService;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
