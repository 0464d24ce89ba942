use aula_auth::User;
use aula_cache::{QueryFn, QueryKey};
use aula_core::ClientError;
use aula_models::{ChangePasswordForm, ProfileForm, SchoolSettings};
use serde_json::Value;
use tracing::instrument;
use validator::Validate;

use crate::client::HttpClient;

pub struct SettingsService;

impl SettingsService {
    pub async fn school(client: &HttpClient) -> Result<SchoolSettings, ClientError> {
        client.get("/settings", &Value::Null).await
    }

    #[instrument(skip(client, settings))]
    pub async fn update_school(
        client: &HttpClient,
        settings: &SchoolSettings,
    ) -> Result<SchoolSettings, ClientError> {
        settings.validate()?;
        client.put("/settings", settings).await
    }

    #[instrument(skip(client, form))]
    pub async fn update_profile(
        client: &HttpClient,
        form: &ProfileForm,
    ) -> Result<User, ClientError> {
        form.validate()?;
        client.put("/auth/profile", form).await
    }

    #[instrument(skip_all)]
    pub async fn change_password(
        client: &HttpClient,
        form: &ChangePasswordForm,
    ) -> Result<Value, ClientError> {
        form.validate()?;
        client.put("/auth/password", form).await
    }

    pub fn school_fetcher(client: HttpClient) -> QueryFn {
        QueryFn::new(move |_: QueryKey| {
            let client = client.clone();
            async move { Self::school(&client).await }
        })
    }
}
