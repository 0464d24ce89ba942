pub mod controller;
pub mod service;

pub use controller::LoginController;
pub use service::AuthService;
