use std::ops::Deref;

use aula_cache::{Mutation, MutationError, QueryHandle, QueryOptions, keys};
use aula_models::{Message, MessageId, UnreadCount};

use crate::modules::crud::{CrudPage, ListFilters, Resource};
use crate::modules::messages::{MessageService, Messages};
use crate::state::AppState;

/// Inbox and unread badge, both polled while the page is open.
pub struct MessagesPage {
    crud: CrudPage<Messages>,
    unread: QueryHandle<UnreadCount>,
    mark_read: Mutation<MessageId, Message>,
}

impl Deref for MessagesPage {
    type Target = CrudPage<Messages>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

impl MessagesPage {
    pub fn new(state: &AppState) -> Self {
        let interval = state.config.polling.messages_interval;
        let crud = CrudPage::with_options(
            state,
            ListFilters::default(),
            QueryOptions::new().refetch_interval(interval),
        );
        let unread = state.cache.subscribe(
            keys::messages::unread_count(),
            MessageService::unread_fetcher(state.client.clone()),
            QueryOptions::new().refetch_interval(interval),
        );

        let client = state.client.clone();
        let mark_read = Mutation::new(state.cache.clone(), move |id: MessageId| {
            let client = client.clone();
            async move { MessageService::mark_read(&client, &id).await }
        })
        .invalidates_all(keys::invalidate::message_write());

        Self {
            crud,
            unread,
            mark_read,
        }
    }

    pub fn unread_count(&self) -> i64 {
        self.unread.data().map(|u| u.count).unwrap_or(0)
    }

    /// Unread count once the current request (if any) has landed.
    pub async fn unread_settled(&self) -> i64 {
        self.unread.settled().await.data.map(|u| u.count).unwrap_or(0)
    }

    pub fn unread_handle(&self) -> &QueryHandle<UnreadCount> {
        &self.unread
    }

    /// Opens the compose form empty.
    pub fn compose(&self) {
        self.crud.open_create();
    }

    /// Opens the compose form addressed back to the sender.
    pub fn reply(&self, message: &Message) {
        self.crud.open_create();
        self.crud.update_form(|form| *form = Messages::form_for(message));
    }

    /// Sends the compose form.
    pub async fn send(&self) -> Result<Message, MutationError> {
        self.crud.submit().await
    }

    pub async fn mark_read(&self, id: MessageId) -> Result<Message, MutationError> {
        self.mark_read.mutate(id).await
    }
}
