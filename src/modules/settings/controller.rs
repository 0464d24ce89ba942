use aula_auth::User;
use aula_cache::{Mutation, MutationError, QueryHandle, QueryOptions, keys};
use aula_models::{ChangePasswordForm, ProfileForm, SchoolSettings};
use serde_json::Value;
use tracing::warn;

use crate::modules::settings::SettingsService;
use crate::notifications::ToastRequest;
use crate::state::AppState;

pub struct SettingsPage {
    state: AppState,
    settings: QueryHandle<SchoolSettings>,
    save_settings: Mutation<SchoolSettings, SchoolSettings>,
    save_profile: Mutation<ProfileForm, User>,
    change_password: Mutation<ChangePasswordForm, Value>,
}

fn error_toast(state: &AppState) -> impl Fn(&aula_core::ClientError) + Send + Sync + 'static {
    let toaster = state.toaster.clone();
    move |error| {
        toaster.toast(ToastRequest::error("Error", error.message()));
    }
}

impl SettingsPage {
    pub fn new(state: &AppState) -> Self {
        let settings = state.cache.subscribe(
            keys::settings::school(),
            SettingsService::school_fetcher(state.client.clone()),
            QueryOptions::default(),
        );

        let client = state.client.clone();
        let toaster = state.toaster.clone();
        let save_settings = Mutation::new(state.cache.clone(), move |settings: SchoolSettings| {
            let client = client.clone();
            async move { SettingsService::update_school(&client, &settings).await }
        })
        .invalidates_all(keys::invalidate::settings_write())
        .on_success(move |_| {
            toaster.toast(ToastRequest::success(
                "Settings saved",
                "School settings were updated",
            ));
        })
        .on_error(error_toast(state));

        let client = state.client.clone();
        let toaster = state.toaster.clone();
        let session = state.session.clone();
        let save_profile = Mutation::new(state.cache.clone(), move |form: ProfileForm| {
            let client = client.clone();
            async move { SettingsService::update_profile(&client, &form).await }
        })
        .invalidates_all(keys::invalidate::profile_write())
        .on_success(move |user: &User| {
            match serde_json::to_value(user) {
                Ok(patch) => {
                    session.update_user(&patch);
                }
                Err(e) => warn!(error = %e, "Could not merge updated profile"),
            }
            toaster.toast(ToastRequest::success("Profile updated", "Your profile was saved"));
        })
        .on_error(error_toast(state));

        let client = state.client.clone();
        let toaster = state.toaster.clone();
        let change_password = Mutation::new(state.cache.clone(), move |form: ChangePasswordForm| {
            let client = client.clone();
            async move { SettingsService::change_password(&client, &form).await }
        })
        .on_success(move |_| {
            toaster.toast(ToastRequest::success(
                "Password changed",
                "Use your new password next time you sign in",
            ));
        })
        .on_error(error_toast(state));

        Self {
            state: state.clone(),
            settings,
            save_settings,
            save_profile,
            change_password,
        }
    }

    pub fn settings(&self) -> Option<SchoolSettings> {
        self.settings.data()
    }

    pub fn handle(&self) -> &QueryHandle<SchoolSettings> {
        &self.settings
    }

    /// Profile form pre-filled from the signed-in user.
    pub fn profile_form(&self) -> ProfileForm {
        let user = self.state.session.user().unwrap_or_default();
        let phone = user
            .extra
            .get("phone")
            .and_then(Value::as_str)
            .map(str::to_string);
        ProfileForm {
            name: user.name,
            email: user.email,
            phone,
        }
    }

    pub async fn save_settings(
        &self,
        settings: SchoolSettings,
    ) -> Result<SchoolSettings, MutationError> {
        self.save_settings.mutate(settings).await
    }

    pub async fn update_profile(&self, form: ProfileForm) -> Result<User, MutationError> {
        self.save_profile.mutate(form).await
    }

    pub async fn change_password(
        &self,
        form: ChangePasswordForm,
    ) -> Result<Value, MutationError> {
        self.change_password.mutate(form).await
    }
}
