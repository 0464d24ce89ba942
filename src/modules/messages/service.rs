use aula_cache::{QueryFn, QueryKey, keys};
use aula_core::ClientError;
use aula_models::{Message, MessageForm, MessageId, UnreadCount};
use serde_json::{Value, json};
use tracing::instrument;

use crate::client::HttpClient;
use crate::modules::crud::Resource;

pub struct Messages;

impl Resource for Messages {
    type Item = Message;
    type Form = MessageForm;
    type Stats = Value;

    const PATH: &'static str = "/messages";
    const KEY: &'static str = keys::messages::ROOT;
    const LABEL: &'static str = "Message";

    fn id(item: &Message) -> String {
        item.id.to_string()
    }

    /// Editing a message means replying to it.
    fn form_for(item: &Message) -> MessageForm {
        MessageForm {
            recipients: item.sender.iter().cloned().collect(),
            subject: format!("Re: {}", item.subject),
            body: String::new(),
        }
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::message_write()
    }
}

pub struct MessageService;

impl MessageService {
    #[instrument(skip(client))]
    pub async fn mark_read(client: &HttpClient, id: &MessageId) -> Result<Message, ClientError> {
        client
            .patch(&format!("/messages/{id}/read"), &json!({ "read": true }))
            .await
    }

    pub async fn unread_count(client: &HttpClient) -> Result<UnreadCount, ClientError> {
        client.get("/messages/unread-count", &Value::Null).await
    }

    pub fn unread_fetcher(client: HttpClient) -> QueryFn {
        QueryFn::new(move |_: QueryKey| {
            let client = client.clone();
            async move { Self::unread_count(&client).await }
        })
    }
}
