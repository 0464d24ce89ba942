use aula_auth::User;
use aula_core::ClientError;
use aula_models::LoginRequest;
use tracing::{info, warn};

use crate::modules::auth::AuthService;
use crate::navigation::{Navigator, Route};
use crate::notifications::ToastRequest;
use crate::state::AppState;

/// Sign-in, sign-out and refreshing the current user.
#[derive(Debug, Clone)]
pub struct LoginController {
    state: AppState,
}

impl LoginController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.session.is_loading()
    }

    /// Signs in and opens the dashboard.
    ///
    /// On failure the error is toasted and the session stays anonymous.
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<User, ClientError> {
        let request = LoginRequest {
            email: email.into().trim().to_string(),
            password: password.into(),
        };

        let session = &self.state.session;
        session.set_loading(true);
        let result = AuthService::login(&self.state.client, &request).await;
        session.set_loading(false);

        match result {
            Ok(response) => {
                info!(user_id = %response.user.id, "Signed in");
                // nothing cached belongs to the new user yet
                self.state.cache.clear();
                session.login(response.user.clone(), response.token);
                self.state.router.navigate(Route::Dashboard);
                Ok(response.user)
            }
            Err(error) => {
                warn!(error = %error, "Sign-in failed");
                self.state.toaster.toast(ToastRequest::error(
                    "Sign-in failed",
                    error.message(),
                ));
                Err(error)
            }
        }
    }

    /// Clears the session and every cached query, then shows the login screen.
    pub fn logout(&self) {
        self.state.session.logout();
        self.state.cache.clear();
        self.state.router.navigate(Route::Login);
        info!("Signed out");
    }

    /// Re-reads the signed-in user and merges it into the session.
    pub async fn refresh_user(&self) -> Result<Option<User>, ClientError> {
        let user = AuthService::me(&self.state.client).await?;
        let patch = serde_json::to_value(&user).map_err(ClientError::decode)?;
        self.state.session.update_user(&patch);
        Ok(self.state.session.user())
    }
}
