pub mod controller;
pub mod service;

pub use controller::MessagesPage;
pub use service::{MessageService, Messages};
