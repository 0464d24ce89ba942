use std::sync::Arc;

use aula_auth::{FileSessionPersistence, SessionStore};
use aula_cache::QueryCache;
use aula_config::AppConfig;

use crate::client::HttpClient;
use crate::error::AppError;
use crate::navigation::{AppRouter, Route};
use crate::notifications::Toaster;

/// Everything a page needs, created once at startup and cloned into each
/// controller. All members are cheap handles over shared state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub session: SessionStore,
    pub cache: QueryCache,
    pub client: HttpClient,
    pub toaster: Toaster,
    pub router: AppRouter,
}

impl AppState {
    /// Wires the application around an existing session store.
    pub fn new(config: AppConfig, session: SessionStore) -> Result<Self, AppError> {
        let initial = if session.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Login
        };
        let router = AppRouter::new(initial);
        let client = HttpClient::new(&config.api, session.clone(), Arc::new(router.clone()))?;

        Ok(Self {
            cache: QueryCache::new(config.query.clone()),
            toaster: Toaster::new(&config.toast),
            config,
            session,
            client,
            router,
        })
    }
}

/// Builds the state from configuration, restoring the persisted session.
pub fn init_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let persistence = FileSessionPersistence::from_config(&config.session);
    let session = SessionStore::restore(Arc::new(persistence));
    AppState::new(config, session)
}
