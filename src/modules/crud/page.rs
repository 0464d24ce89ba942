use std::sync::{Arc, Mutex};

use aula_cache::{
    Debouncer, Mutation, MutationError, QueryHandle, QueryKey, QueryOptions, QueryState,
};
use aula_core::{ClientError, FieldErrors, Paginated};
use serde_json::Value;
use tracing::debug;

use crate::modules::crud::{
    CrudService, ListFilters, ModalMode, ModalState, Resource, lock,
};
use crate::notifications::ToastRequest;
use crate::state::AppState;

/// Create or update payload; `id` is set when editing.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveInput<F> {
    pub id: Option<String>,
    pub form: F,
}

/// Controller behind a list / stats / modal page.
pub struct CrudPage<R: Resource> {
    state: AppState,
    filters: Arc<Mutex<ListFilters>>,
    list: QueryHandle<Paginated<R::Item>>,
    stats: Option<QueryHandle<R::Stats>>,
    modal: Arc<Mutex<ModalState<R::Form>>>,
    save: Mutation<SaveInput<R::Form>, R::Item>,
    remove: Mutation<String, ()>,
    search: Debouncer,
}

fn list_key<R: Resource>(filters: &ListFilters) -> QueryKey {
    QueryKey::new(R::KEY).with(filters.to_params())
}

impl<R: Resource> CrudPage<R> {
    pub fn new(state: &AppState) -> Self {
        Self::with_options(state, ListFilters::default(), QueryOptions::default())
    }

    pub fn with_filters(state: &AppState, filters: ListFilters) -> Self {
        Self::with_options(state, filters, QueryOptions::default())
    }

    /// `list_options` applies to the list subscription only (e.g. polling).
    pub fn with_options(state: &AppState, filters: ListFilters, list_options: QueryOptions) -> Self {
        let list = state.cache.subscribe(
            list_key::<R>(&filters),
            CrudService::<R>::list_fetcher(state.client.clone()),
            list_options,
        );
        let stats = R::stats_key().map(|key| {
            state.cache.subscribe(
                key,
                CrudService::<R>::stats_fetcher(state.client.clone()),
                QueryOptions::default(),
            )
        });

        let modal = Arc::new(Mutex::new(ModalState::default()));
        let save = Self::save_mutation(state, modal.clone());
        let remove = Self::remove_mutation(state);

        Self {
            state: state.clone(),
            filters: Arc::new(Mutex::new(filters)),
            list,
            stats,
            modal,
            save,
            remove,
            search: Debouncer::new(state.config.polling.search_debounce),
        }
    }

    fn save_mutation(
        state: &AppState,
        modal: Arc<Mutex<ModalState<R::Form>>>,
    ) -> Mutation<SaveInput<R::Form>, R::Item> {
        let client = state.client.clone();
        let on_success = (modal.clone(), state.toaster.clone());
        let on_error = (modal, state.toaster.clone());

        Mutation::new(state.cache.clone(), move |input: SaveInput<R::Form>| {
            let client = client.clone();
            async move {
                match input.id {
                    Some(id) => CrudService::<R>::update(&client, &id, &input.form).await,
                    None => CrudService::<R>::create(&client, &input.form).await,
                }
            }
        })
        .invalidates_all(R::invalidates())
        .on_success(move |_| {
            let (modal, toaster) = &on_success;
            let title = {
                let mut modal = lock(modal);
                let title = match modal.mode {
                    ModalMode::Edit(_) => format!("{} updated", R::LABEL),
                    _ => format!("{} created", R::LABEL),
                };
                modal.close();
                title
            };
            toaster.toast(ToastRequest::success(title, "Changes saved successfully"));
        })
        .on_error(move |error| {
            let (modal, toaster) = &on_error;
            if let Some(fields) = error.field_errors() {
                lock(modal).errors = fields.clone();
            }
            toaster.toast(ToastRequest::error("Error", error.message()));
        })
    }

    fn remove_mutation(state: &AppState) -> Mutation<String, ()> {
        let client = state.client.clone();
        let ok = state.toaster.clone();
        let failed = state.toaster.clone();

        Mutation::new(state.cache.clone(), move |id: String| {
            let client = client.clone();
            async move { CrudService::<R>::delete(&client, &id).await }
        })
        .invalidates_all(R::invalidates())
        .on_success(move |_| {
            ok.toast(ToastRequest::success(
                format!("{} deleted", R::LABEL),
                "The record was removed",
            ));
        })
        .on_error(move |error| {
            failed.toast(ToastRequest::error("Error", error.message()));
        })
    }

    pub fn app(&self) -> &AppState {
        &self.state
    }

    // ---- list ----

    pub fn list(&self) -> &QueryHandle<Paginated<R::Item>> {
        &self.list
    }

    pub fn list_state(&self) -> QueryState<Paginated<R::Item>> {
        self.list.state()
    }

    /// Rows on the current page; empty while loading.
    pub fn items(&self) -> Vec<R::Item> {
        self.list.data().map(|page| page.items).unwrap_or_default()
    }

    pub fn stats(&self) -> Option<R::Stats> {
        self.stats.as_ref().and_then(QueryHandle::data)
    }

    pub fn stats_state(&self) -> Option<QueryState<R::Stats>> {
        self.stats.as_ref().map(QueryHandle::state)
    }

    /// Waits for in-flight list and stats requests.
    pub async fn settled(&self) -> QueryState<Paginated<R::Item>> {
        if let Some(stats) = &self.stats {
            stats.settled().await;
        }
        self.list.settled().await
    }

    pub async fn refresh(&self) -> Result<Paginated<R::Item>, ClientError> {
        self.list.refetch().await
    }

    // ---- filters ----

    pub fn filters(&self) -> ListFilters {
        lock(&self.filters).clone()
    }

    fn update_filters(&self, change: impl FnOnce(&mut ListFilters)) {
        let key = {
            let mut filters = lock(&self.filters);
            change(&mut filters);
            list_key::<R>(&filters)
        };
        self.list.set_key(key);
    }

    pub fn set_page(&self, page: i64) {
        self.update_filters(|f| f.set_page(page));
    }

    /// Moves forward when the server reports another page.
    pub fn next_page(&self) -> bool {
        let has_next = self
            .list
            .data()
            .and_then(|page| page.pagination)
            .is_some_and(|p| p.has_next());
        if has_next {
            self.update_filters(|f| f.set_page(f.page + 1));
        }
        has_next
    }

    pub fn previous_page(&self) -> bool {
        let page = lock(&self.filters).page;
        if page > 1 {
            self.set_page(page - 1);
        }
        page > 1
    }

    pub fn set_limit(&self, limit: i64) {
        self.update_filters(|f| f.set_limit(limit));
    }

    pub fn set_filter(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        self.update_filters(|f| f.set_filter(name, value));
    }

    /// Applies a search term after the debounce delay. Each call restarts
    /// the delay, so only the last term of a burst is requested.
    pub fn set_search(&self, term: impl Into<String>) {
        let term = term.into();
        let filters = self.filters.clone();
        let list = self.list.clone();
        self.search.call(async move {
            let key = {
                let mut filters = lock(&filters);
                filters.set_search(term);
                list_key::<R>(&filters)
            };
            debug!(key = %key, "Applying search");
            list.set_key(key);
        });
    }

    /// Applies a search term right away, dropping any pending one.
    pub fn search_now(&self, term: impl Into<String>) {
        self.search.cancel();
        let term = term.into();
        self.update_filters(|f| f.set_search(term));
    }

    // ---- modal ----

    pub fn modal(&self) -> ModalState<R::Form> {
        lock(&self.modal).clone()
    }

    pub fn open_create(&self) {
        self.save.reset();
        lock(&self.modal).open_create();
    }

    pub fn open_edit(&self, item: &R::Item) {
        self.save.reset();
        lock(&self.modal).open_edit(R::id(item), R::form_for(item));
    }

    pub fn close_modal(&self) {
        lock(&self.modal).close();
    }

    /// Edits the form being typed.
    pub fn update_form(&self, edit: impl FnOnce(&mut R::Form)) {
        edit(&mut lock(&self.modal).form);
    }

    pub fn field_errors(&self) -> FieldErrors {
        lock(&self.modal).errors.clone()
    }

    pub fn is_saving(&self) -> bool {
        self.save.is_pending()
    }

    pub fn is_deleting(&self) -> bool {
        self.remove.is_pending()
    }

    /// Validates and sends the open form.
    ///
    /// Missing fields are reported inline and nothing is sent. On success
    /// the modal closes; on failure it stays open with the input intact.
    pub async fn submit(&self) -> Result<R::Item, MutationError> {
        let input = {
            let mut modal = lock(&self.modal);
            let id = match &modal.mode {
                ModalMode::Closed => {
                    let mut errors = FieldErrors::new();
                    errors.insert("form", "No form is open");
                    return Err(ClientError::Validation(errors).into());
                }
                ModalMode::Create => None,
                ModalMode::Edit(id) => Some(id.clone()),
            };
            if !modal.validate() {
                return Err(ClientError::Validation(modal.errors.clone()).into());
            }
            SaveInput {
                id,
                form: modal.form.clone(),
            }
        };
        self.save.mutate(input).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), MutationError> {
        self.remove.mutate(id.to_string()).await
    }
}
