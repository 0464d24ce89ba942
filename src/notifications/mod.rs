//! User feedback.
//!
//! Writes report their outcome as toasts; reads never do (they render
//! errors inline). [`Toaster`] owns the queue, the renderer subscribes.

pub mod toaster;

pub use toaster::{Toast, ToastId, ToastRequest, ToastVariant, Toaster};
