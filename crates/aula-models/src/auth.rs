//! Login request and response.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use aula_auth::User;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `data` of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}
