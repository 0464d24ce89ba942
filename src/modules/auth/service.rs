use aula_auth::User;
use aula_core::ClientError;
use aula_models::{LoginRequest, LoginResponse};
use serde_json::Value;
use tracing::instrument;
use validator::Validate;

use crate::client::HttpClient;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(client, request), fields(email = %request.email))]
    pub async fn login(
        client: &HttpClient,
        request: &LoginRequest,
    ) -> Result<LoginResponse, ClientError> {
        request.validate()?;
        client.post("/auth/login", request).await
    }

    /// The signed-in user as the server currently sees them.
    #[instrument(skip(client))]
    pub async fn me(client: &HttpClient) -> Result<User, ClientError> {
        client.get("/auth/me", &Value::Null).await
    }
}
